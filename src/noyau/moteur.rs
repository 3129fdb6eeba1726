//! Moteur d’expression : façade au-dessus du pipeline.
//!
//! État : texte source + dernier résultat (+ l’erreur qui l’a produit, pour le message).
//! Chaque `set_texte` recalcule tout, sans I/O ; les piles sont locales à l’appel.

use tracing::debug;

use super::erreur::ErreurNoyau;
use super::eval::{demarche, eval_expression, DemarcheNoyau};

/// Résultat à trois états.
///
/// `SansValeur` (texte vide) n’est ni une erreur ni un zéro.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Resultat {
    #[default]
    SansValeur,
    Invalide,
    Valeur(f64),
}

impl Resultat {
    pub fn est_valide(self) -> bool {
        matches!(self, Resultat::Valeur(_))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Moteur {
    texte: String,
    resultat: Resultat,
    erreur: Option<ErreurNoyau>,
}

impl Moteur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remplace le texte source et recalcule le résultat.
    pub fn set_texte(&mut self, texte: &str) -> Resultat {
        self.texte.clear();
        self.texte.push_str(texte);

        let (resultat, erreur) = if texte.is_empty() {
            (Resultat::SansValeur, None)
        } else {
            match eval_expression(texte) {
                Ok(v) => (Resultat::Valeur(v), None),
                Err(e) => (Resultat::Invalide, Some(e)),
            }
        };

        debug!(texte, ?resultat, ?erreur, "moteur: texte évalué");

        self.resultat = resultat;
        self.erreur = erreur;
        resultat
    }

    /// Dernier résultat, sans recalcul.
    pub fn resultat(&self) -> Resultat {
        self.resultat
    }

    #[cfg(test)]
    pub fn texte(&self) -> &str {
        &self.texte
    }

    #[cfg(test)]
    pub fn erreur(&self) -> Option<&ErreurNoyau> {
        self.erreur.as_ref()
    }

    /// Message de la première erreur de syntaxe ; `None` si valide, vide, ou non fini.
    pub fn message_erreur(&self) -> Option<String> {
        self.erreur.as_ref().and_then(ErreurNoyau::message)
    }

    /// Jetons + RPN du texte courant (panneau “Démarche”).
    pub fn demarche(&self) -> DemarcheNoyau {
        if self.texte.is_empty() {
            return DemarcheNoyau::default();
        }
        demarche(&self.texte)
    }
}

/// Raccourci : évalue un texte avec un moteur neuf.
#[cfg(test)]
pub fn evaluer(texte: &str) -> Resultat {
    Moteur::new().set_texte(texte)
}
