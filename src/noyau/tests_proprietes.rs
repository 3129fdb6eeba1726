//! Tests de propriétés : la table de contrat du moteur.
//!
//! - valeurs attendues (priorités, parenthèses, signes)
//! - invalide SANS message : non-finitude
//! - invalide AVEC message : formule mal formée
//! - vide => SansValeur
//! - idempotence + insensibilité aux espaces

use super::moteur::{evaluer, Moteur, Resultat};

fn assert_valeur(expr: &str, attendu: f64) {
    assert_eq!(evaluer(expr), Resultat::Valeur(attendu), "expr={expr:?}");
}

fn assert_malforme(expr: &str) {
    let mut m = Moteur::new();
    assert_eq!(m.set_texte(expr), Resultat::Invalide, "expr={expr:?}");
    let msg = m
        .message_erreur()
        .unwrap_or_else(|| panic!("message attendu pour expr={expr:?}"));
    assert!(!msg.is_empty(), "expr={expr:?}");
}

fn assert_non_fini(expr: &str) {
    let mut m = Moteur::new();
    assert_eq!(m.set_texte(expr), Resultat::Invalide, "expr={expr:?}");
    assert_eq!(m.message_erreur(), None, "expr={expr:?}");
}

/* ------------------------ Valeurs ------------------------ */

#[test]
fn prop_priorites() {
    assert_valeur("2+3", 5.0);
    assert_valeur("2*3+4", 10.0);
    assert_valeur("2*(3+4)", 14.0);
}

#[test]
fn prop_signes() {
    assert_valeur("-5+2", -3.0);
    assert_valeur("-(2+3)", -5.0);
    assert_valeur("+5", 5.0);
}

/* ------------------------ Invalides ------------------------ */

#[test]
fn prop_division_par_zero_sans_message() {
    assert_non_fini("5/0");
    assert_non_fini("0/0");
    assert_non_fini("-(1/0)");
}

#[test]
fn prop_malformes_avec_message() {
    assert_malforme("2++");
    assert_malforme("(2+3");
    assert_malforme("2+3)");
    assert_malforme("2#3");
    assert_malforme("1..2");
    assert_malforme("*2");
}

/* ------------------------ Vide ------------------------ */

#[test]
fn prop_vide_distinct() {
    let r = evaluer("");
    assert_eq!(r, Resultat::SansValeur);
    assert_ne!(r, Resultat::Invalide);
    assert_ne!(r, Resultat::Valeur(0.0));
}

/* ------------------------ Idempotence / espaces ------------------------ */

#[test]
fn prop_idempotence() {
    let mut m = Moteur::new();
    let a = m.set_texte("7*(1-3)");
    let b = m.set_texte("7*(1-3)");
    assert_eq!(a, b);
    assert_eq!(m.resultat(), Resultat::Valeur(-14.0));
}

#[test]
fn prop_espaces() {
    assert_eq!(evaluer("2 + 3"), evaluer("2+3"));
    assert_eq!(evaluer(" ( 2 +3 ) *  4 "), evaluer("(2+3)*4"));
}
