//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter les deux saisies (numérique + calcul), le journal de leurs événements
//! et les actions “boutons” (poser un texte, poser une valeur, générer, détruire).
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par les saisies (donc par le noyau pour le calcul).
//! - Les affichages ne sont alimentés QUE par les abonnements (comme une page branchée sur des écouteurs).
//! - Suivi coupé : les poignées sont rendues une à une (desabonner), les saisies restent vivantes.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use super::notificateur::{Abonnement, Evenement, TypeEvenement};
use super::saisie::{
    Interpretation, InterpretationCalcul, InterpretationNumerique, Saisie, SaisieCalcul,
    SaisieNumerique,
};
use crate::noyau::format::format_valeur;
use crate::noyau::generateur::generer;
use crate::noyau::{ConfigGenerateur, Resultat};

/// Garde-fou : profondeur max proposée dans l’UI (anti-formules géantes).
pub const PROFONDEUR_MAX: usize = 6;

/// Garde-fou : opérandes max par groupe proposés dans l’UI.
pub const OPERANDES_MAX: usize = 8;

/// Dernières valeurs reçues par les écouteurs d’une saisie.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Affichage {
    pub texte: String,
    pub valeur: String,
    pub valide: String,
}

impl Affichage {
    fn recevoir(&mut self, e: &Evenement) {
        match e {
            Evenement::TexteChange(t) => self.texte = t.clone(),
            Evenement::ValeurChangee(r) => self.valeur = decrire_resultat(*r),
            Evenement::ValiditeChangee(v) => self.valide = v.to_string(),
        }
    }
}

fn decrire_resultat(r: Resultat) -> String {
    match r {
        Resultat::Valeur(v) => format_valeur(v),
        Resultat::Invalide => "invalide".to_string(),
        Resultat::SansValeur => "vide".to_string(),
    }
}

/// Branche les trois types d’événements d’une saisie sur un affichage partagé.
fn brancher<I: Interpretation>(
    saisie: &mut Saisie<I>,
    affichage: &Rc<RefCell<Affichage>>,
) -> Vec<Abonnement> {
    [
        TypeEvenement::TexteChange,
        TypeEvenement::ValeurChangee,
        TypeEvenement::ValiditeChangee,
    ]
    .into_iter()
    .map(|t| {
        let a = Rc::clone(affichage);
        saisie.abonner(t, move |e: &Evenement| a.borrow_mut().recevoir(e))
    })
    .collect()
}

fn debrancher<I: Interpretation>(saisie: &mut Saisie<I>, abonnements: &mut Vec<Abonnement>) {
    for a in abonnements.drain(..) {
        saisie.desabonner(a);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cible {
    Numerique,
    Calcul,
}

/// Champs “poser un texte / poser une valeur” d’une saisie.
#[derive(Clone, Debug, Default)]
pub struct Commandes {
    pub texte: String,
    pub valeur: String,
}

pub struct AppSaisies {
    // --- saisies ---
    pub numerique: SaisieNumerique,
    pub calcul: SaisieCalcul,

    // --- sorties (alimentées par abonnements) ---
    pub affichage_numerique: Rc<RefCell<Affichage>>,
    pub affichage_calcul: Rc<RefCell<Affichage>>,
    abonnements_numerique: Vec<Abonnement>,
    abonnements_calcul: Vec<Abonnement>,

    // --- commandes ---
    pub commandes_numerique: Commandes,
    pub commandes_calcul: Commandes,
    pub erreur: String,

    // --- générateur ---
    pub config: ConfigGenerateur,

    pub detruit: bool,
}

impl Default for AppSaisies {
    fn default() -> Self {
        let mut numerique = SaisieNumerique::new(InterpretationNumerique);
        let mut calcul = SaisieCalcul::new(InterpretationCalcul::new());

        let affichage_numerique = Rc::new(RefCell::new(Affichage::default()));
        let affichage_calcul = Rc::new(RefCell::new(Affichage::default()));

        let abonnements_numerique = brancher(&mut numerique, &affichage_numerique);
        let abonnements_calcul = brancher(&mut calcul, &affichage_calcul);

        Self {
            numerique,
            calcul,
            affichage_numerique,
            affichage_calcul,
            abonnements_numerique,
            abonnements_calcul,
            commandes_numerique: Commandes::default(),
            commandes_calcul: Commandes::default(),
            erreur: String::new(),
            config: ConfigGenerateur::default(),
            detruit: false,
        }
    }
}

impl AppSaisies {
    fn commandes(&self, cible: Cible) -> &Commandes {
        match cible {
            Cible::Numerique => &self.commandes_numerique,
            Cible::Calcul => &self.commandes_calcul,
        }
    }

    /// Bouton “texte” : pose le champ tel quel dans la saisie.
    pub fn appliquer_texte(&mut self, cible: Cible) {
        let texte = self.commandes(cible).texte.clone();
        self.erreur.clear();
        match cible {
            Cible::Numerique => self.numerique.set_texte(&texte),
            Cible::Calcul => self.calcul.set_texte(&texte),
        }
    }

    /// Bouton “valeur” : le champ doit être un nombre fini.
    pub fn appliquer_valeur(&mut self, cible: Cible) {
        let brut = self.commandes(cible).valeur.trim().to_string();
        if brut.is_empty() {
            return;
        }

        let v = match brut.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.erreur = format!("« {brut} » n’est pas un nombre");
                return;
            }
        };

        self.erreur.clear();
        match cible {
            Cible::Numerique => self.numerique.set_valeur(v),
            Cible::Calcul => self.calcul.set_valeur(v),
        }
    }

    /// Remplit la saisie de calcul avec une formule aléatoire.
    pub fn generer_formule(&mut self) {
        let mut rng = rand::thread_rng();
        let formule = generer(self.config.clone(), &mut rng);
        debug!(%formule, "formule générée");
        self.calcul.set_texte(&formule);
    }

    /// Borne les réglages du générateur exposés dans l’UI.
    pub fn set_config(&mut self, max_profondeur: usize, max_operandes: usize, chiffres: usize) {
        self.config = ConfigGenerateur::new(
            max_profondeur.min(PROFONDEUR_MAX),
            max_operandes.min(OPERANDES_MAX),
            self.config.max_nombre,
            chiffres,
        )
        .with_signes(self.config.proba_moins, self.config.proba_plus);
    }

    pub fn suivi(&self) -> bool {
        !self.abonnements_calcul.is_empty()
    }

    /// Case “suivre les événements” : désabonne ou rebranche les affichages.
    pub fn set_suivi(&mut self, suivi: bool) {
        if self.detruit || suivi == self.suivi() {
            return;
        }
        if suivi {
            self.abonnements_numerique = brancher(&mut self.numerique, &self.affichage_numerique);
            self.abonnements_calcul = brancher(&mut self.calcul, &self.affichage_calcul);
        } else {
            debrancher(&mut self.numerique, &mut self.abonnements_numerique);
            debrancher(&mut self.calcul, &mut self.abonnements_calcul);
        }
        debug!(suivi, "suivi des événements");
    }

    /// Coupe tous les abonnements : les affichages ne bougent plus.
    pub fn detruire(&mut self) {
        info!("saisies détruites");
        self.numerique.detruire();
        self.calcul.detruire();
        self.abonnements_numerique.clear();
        self.abonnements_calcul.clear();
        self.detruit = true;
    }
}
