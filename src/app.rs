// src/app.rs
//
// Saisies RPN — module App (racine)
// ---------------------------------
// Rôle:
// - Déclarer les sous-modules (notificateur, saisie, etat, vue)
// - Ré-exporter AppSaisies (pour main.rs: use crate::app::AppSaisies;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)

pub mod etat;
pub mod notificateur;
pub mod saisie;
pub mod vue;

// Ré-export pratique : `use crate::app::AppSaisies;`
pub use etat::AppSaisies;

use eframe::egui;

impl eframe::App for AppSaisies {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
