// src/noyau/format.rs

use super::moteur::Resultat;

/// Affichage d’un résultat invalide (formule mal formée ou non finie).
pub const AFFICHAGE_INVALIDE: &str = "?";

/// Affichage “rien à montrer” : espace insécable, garde la hauteur de ligne.
pub const AFFICHAGE_VIDE: &str = "\u{00A0}";

/// Valeur finie -> texte court (pas de "-0", pas de ".0" superflu).
pub fn format_valeur(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Résultat -> texte d’affichage.
pub fn format_resultat(r: Resultat) -> String {
    match r {
        Resultat::Valeur(v) => format_valeur(v),
        Resultat::Invalide => AFFICHAGE_INVALIDE.to_string(),
        Resultat::SansValeur => AFFICHAGE_VIDE.to_string(),
    }
}
