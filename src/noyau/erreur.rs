//! Erreurs du noyau (jetons → RPN → pile).
//!
//! Deux familles :
//! - lexicales / structurelles : toujours un message lisible
//! - non-finitude arithmétique : pas de message (résultat indéfini, pas une faute de saisie)

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    /* --- lexicales --- */
    #[error("caractère invalide « {0} »")]
    CaractereInvalide(char),

    #[error("nombre invalide « {0} »")]
    NombreInvalide(String),

    /* --- structurelles --- */
    #[error("« ) » sans « ( » correspondante")]
    FermanteOrpheline,

    #[error("« ( » jamais refermée")]
    OuvranteOrpheline,

    #[error("opérateur unaire invalide « {0} »")]
    UnaireInvalide(char),

    #[error("opérande manquant")]
    OperandeManquant,

    #[error("expression incomplète ({0} valeurs restantes)")]
    ExpressionIncomplete(usize),

    /* --- arithmétique --- */
    #[error("résultat non fini")]
    NonFini,
}

impl ErreurNoyau {
    /// Message à afficher : `None` pour un résultat non fini (division par zéro, débordement).
    pub fn message(&self) -> Option<String> {
        match self {
            ErreurNoyau::NonFini => None,
            e => Some(e.to_string()),
        }
    }
}
