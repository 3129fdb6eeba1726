//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile -> f64 fini
//!
//! Remarque : le refus d’un résultat non fini est fait par la pile (eval_rpn),
//! pas à la division : 1/(1/0) reste une valeur.

use super::erreur::ErreurNoyau;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, format_rpn, to_rpn};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression complète.
///
/// La première erreur rencontrée (lexicale, structurelle ou non-finitude) interrompt tout.
pub fn eval_expression(expr_str: &str) -> Result<f64, ErreurNoyau> {
    // 1) Jetons
    let jetons = tokenize(expr_str)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Pile
    eval_rpn(&rpn)
}

/// Démarche (affichage) : jetons puis RPN, aussi loin que le texte le permet.
pub fn demarche(expr_str: &str) -> DemarcheNoyau {
    let jetons = match tokenize(expr_str) {
        Ok(j) => j,
        Err(e) => {
            return DemarcheNoyau {
                jetons: format!("erreur: {e}"),
                rpn: String::new(),
            }
        }
    };

    let rpn = match to_rpn(&jetons) {
        Ok(r) => format_rpn(&r),
        Err(e) => format!("erreur: {e}"),
    };

    DemarcheNoyau {
        jetons: format_tokens(&jetons),
        rpn,
    }
}
