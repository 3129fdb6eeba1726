// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppSaisies (etat.rs) pour natif + wasm
// - Deux saisies : nombre direct / formule
// - Bordure selon focus + validité (pas de rouge sur un champ vide)
// - Valeur (formule seulement) : "?" si invalide, blanc si vide
// - Panneau “Événements” alimenté par les abonnements

use eframe::egui;

use super::etat::{Affichage, AppSaisies, Cible};
use super::saisie::{Bordure, Interpretation, Saisie};
use crate::noyau::format_resultat;

impl AppSaisies {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Saisies RPN");
                ui.add_space(6.0);

                ui.label("Nombre :");
                champ_saisie(ui, "saisie_numerique", &mut self.numerique, "Nombre");
                self.ui_commandes(ui, Cible::Numerique);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.label("Formule :");
                champ_saisie(ui, "saisie_calcul", &mut self.calcul, "Formule, ex: -2*(3+4)+5/6");
                self.ui_commandes(ui, Cible::Calcul);
                self.ui_generateur(ui);

                if !self.erreur.is_empty() {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
                self.ui_evenements(ui);

                ui.add_space(8.0);
                ui.add_enabled_ui(!self.detruit, |ui| {
                    if ui
                        .button("Détruire")
                        .on_hover_text("Coupe tous les abonnements")
                        .clicked()
                    {
                        self.detruire();
                    }
                });
            });
    }

    fn ui_commandes(&mut self, ui: &mut egui::Ui, cible: Cible) {
        let commandes = match cible {
            Cible::Numerique => &mut self.commandes_numerique,
            Cible::Calcul => &mut self.commandes_calcul,
        };

        let mut poser_texte = false;
        let mut poser_valeur = false;

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut commandes.texte)
                    .desired_width(160.0)
                    .hint_text("texte"),
            );
            poser_texte = ui.button("Poser le texte").clicked();

            ui.separator();

            ui.add(
                egui::TextEdit::singleline(&mut commandes.valeur)
                    .desired_width(100.0)
                    .hint_text("valeur"),
            );
            poser_valeur = ui.button("Poser la valeur").clicked();
        });

        if poser_texte {
            self.appliquer_texte(cible);
        }
        if poser_valeur {
            self.appliquer_valeur(cible);
        }
    }

    fn ui_generateur(&mut self, ui: &mut egui::Ui) {
        let mut profondeur = self.config.max_profondeur;
        let mut operandes = self.config.max_operandes;
        let mut chiffres = self.config.chiffres;

        ui.horizontal_wrapped(|ui| {
            if ui.button("Générer").clicked() {
                self.generer_formule();
            }

            ui.separator();

            let mut change = false;
            ui.label("profondeur");
            change |= ui
                .add(egui::DragValue::new(&mut profondeur).range(0..=super::etat::PROFONDEUR_MAX))
                .changed();
            ui.label("opérandes");
            change |= ui
                .add(egui::DragValue::new(&mut operandes).range(2..=super::etat::OPERANDES_MAX))
                .changed();
            ui.label("décimales");
            change |= ui
                .add(egui::DragValue::new(&mut chiffres).range(0..=4))
                .changed();

            if change {
                self.set_config(profondeur, operandes, chiffres);
            }
        });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        let d = self.calcul.interpretation().demarche();
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                champ_monospace(ui, "Jetons", "demarche_jetons", &d.jetons);
                champ_monospace(ui, "RPN", "demarche_rpn", &d.rpn);
            });
    }

    fn ui_evenements(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Événements")
            .default_open(false)
            .show(ui, |ui| {
                let mut suivi = self.suivi();
                let case = ui.add_enabled(
                    !self.detruit,
                    egui::Checkbox::new(&mut suivi, "Suivre les événements"),
                );
                if case.changed() {
                    self.set_suivi(suivi);
                }

                egui::Grid::new("grille_evenements")
                    .num_columns(4)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("");
                        ui.strong("texte");
                        ui.strong("valeur");
                        ui.strong("valide");
                        ui.end_row();

                        ligne_affichage(ui, "Nombre", &self.affichage_numerique.borrow());
                        ligne_affichage(ui, "Formule", &self.affichage_calcul.borrow());
                    });
            });
    }
}

fn ligne_affichage(ui: &mut egui::Ui, titre: &str, a: &Affichage) {
    ui.label(titre);
    ui.monospace(a.texte.as_str());
    ui.monospace(a.valeur.as_str());
    ui.monospace(a.valide.as_str());
    ui.end_row();
}

fn couleur_bordure(ui: &egui::Ui, bordure: Bordure) -> egui::Stroke {
    let v = ui.visuals();
    match bordure {
        Bordure::Aucune => egui::Stroke::new(1.0, v.widgets.noninteractive.bg_stroke.color),
        Bordure::Focus => egui::Stroke::new(2.0, v.selection.stroke.color),
        Bordure::Invalide => egui::Stroke::new(1.0, v.error_fg_color),
        Bordure::FocusInvalide => egui::Stroke::new(2.0, v.error_fg_color),
    }
}

/// Champ texte bordé selon l’état de la saisie, suivi de sa valeur s’il en affiche une.
fn champ_saisie<I: Interpretation>(
    ui: &mut egui::Ui,
    id: &str,
    saisie: &mut Saisie<I>,
    indice: &str,
) {
    let stroke = couleur_bordure(ui, saisie.bordure());

    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                // TextEdit veut un &mut String : tampon local, puis set_texte si modifié
                let mut tampon = saisie.texte().to_string();
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut tampon)
                        .desired_width(ui.available_width() - 90.0)
                        .hint_text(indice)
                        .id_salt(id)
                        .code_editor(),
                );

                if resp.changed() {
                    saisie.set_texte(&tampon);
                }
                if resp.gained_focus() {
                    saisie.set_focus(true);
                }
                if resp.lost_focus() {
                    saisie.set_focus(false);
                }

                if let Some(r) = saisie.interpretation().valeur_affichee() {
                    ui.monospace(format_resultat(r));
                }
            });

            if let Some(msg) = saisie.message() {
                ui.colored_label(ui.visuals().error_fg_color, msg);
            }
        });
}

fn champ_monospace(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
    ui.add_space(4.0);
    ui.label(format!("{titre} :"));
    // Affichage lecture seule “stable”, sans TextEdit interactif.
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(contenu);
            });
        });
}
