//! Noyau d’expression (flottant)
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation par curseur
//! - rpn.rs        : shunting-yard (signe unaire distinct) + pile d’évaluation
//! - erreur.rs     : erreurs lexicales / structurelles / non-finitude
//! - eval.rs       : pipeline complet + démarche
//! - moteur.rs     : façade (texte -> Resultat à trois états)
//! - format.rs     : affichage d’un Resultat
//! - generateur.rs : formules aléatoires (seed injectable)

pub mod erreur;
pub mod eval;
pub mod format;
pub mod generateur;
pub mod jetons;
pub mod moteur;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::DemarcheNoyau;
pub use format::format_resultat;
pub use generateur::ConfigGenerateur;
pub use moteur::{Moteur, Resultat};
