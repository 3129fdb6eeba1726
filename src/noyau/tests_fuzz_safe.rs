//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline avec le générateur, sans brûler la machine.
//! - RNG déterministe (StdRng, seed fixe)
//! - budget temps global
//! - référence indépendante : petite descente récursive (signe unaire prioritaire)
//! - invariant clé : une formule générée n’est JAMAIS mal formée
//!   (Invalide possible uniquement par non-finitude, donc sans message)

use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::erreur::ErreurNoyau;
use super::generateur::{ConfigGenerateur, GenerateurFormules};
use super::jetons::tokenize;
use super::moteur::{Moteur, Resultat};

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Référence (descente récursive) ------------------------ */

struct Reference<'a> {
    s: &'a [u8],
    i: usize,
}

impl Reference<'_> {
    fn eval(s: &str) -> f64 {
        let mut r = Reference { s: s.as_bytes(), i: 0 };
        let v = r.somme();
        assert_eq!(r.i, r.s.len(), "référence: reste non lu dans {s:?}");
        v
    }

    fn peek(&self) -> Option<u8> {
        self.s.get(self.i).copied()
    }

    fn somme(&mut self) -> f64 {
        let mut v = self.produit();
        while let Some(c @ (b'+' | b'-')) = self.peek() {
            self.i += 1;
            let d = self.produit();
            v = if c == b'+' { v + d } else { v - d };
        }
        v
    }

    fn produit(&mut self) -> f64 {
        let mut v = self.unaire();
        while let Some(c @ (b'*' | b'/')) = self.peek() {
            self.i += 1;
            let d = self.unaire();
            v = if c == b'*' { v * d } else { v / d };
        }
        v
    }

    fn unaire(&mut self) -> f64 {
        match self.peek() {
            Some(b'-') => {
                self.i += 1;
                -self.unaire()
            }
            Some(b'+') => {
                self.i += 1;
                self.unaire()
            }
            _ => self.atome(),
        }
    }

    fn atome(&mut self) -> f64 {
        if self.peek() == Some(b'(') {
            self.i += 1;
            let v = self.somme();
            assert_eq!(self.peek(), Some(b')'));
            self.i += 1;
            return v;
        }
        let start = self.i;
        while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
            self.i += 1;
        }
        let lit = std::str::from_utf8(&self.s[start..self.i]).unwrap();
        lit.parse().unwrap_or_else(|_| panic!("référence: littéral {lit:?}"))
    }
}

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Vérifie une formule générée contre la référence.
fn check_formule(formule: &str) {
    let mut m = Moteur::new();
    let r = m.set_texte(formule);
    let attendu = Reference::eval(formule);

    match r {
        Resultat::Valeur(v) => {
            assert!(
                proche(v, attendu),
                "formule={formule:?} moteur={v} référence={attendu}"
            );
        }
        Resultat::Invalide => {
            assert_eq!(
                m.erreur(),
                Some(&ErreurNoyau::NonFini),
                "formule générée mal formée: {formule:?}"
            );
            assert!(!attendu.is_finite(), "formule={formule:?} référence={attendu}");
        }
        Resultat::SansValeur => panic!("formule vide générée"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_jetons_toujours_acceptes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut g = GenerateurFormules::new(ConfigGenerateur::default(), StdRng::seed_from_u64(0xC0FFEE));

    for _ in 0..1500 {
        budget(t0, max);
        let f = g.generer();
        if let Err(e) = tokenize(&f) {
            panic!("erreur lexicale sur formule générée {f:?}: {e}");
        }
    }
}

#[test]
fn fuzz_safe_moteur_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut g = GenerateurFormules::new(ConfigGenerateur::default(), StdRng::seed_from_u64(0xBADC0DE));

    let mut seen_ok = 0usize;
    for _ in 0..1000 {
        budget(t0, max);
        let f = g.generer();
        check_formule(&f);
        if Moteur::new().set_texte(&f).est_valide() {
            seen_ok += 1;
        }
    }

    // On veut surtout des valeurs, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 500, "trop peu de succès: {seen_ok}");
}

#[test]
fn fuzz_safe_decimaux_et_profondeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let config = ConfigGenerateur::new(5, 5, 1000.0, 3);
    let mut g = GenerateurFormules::new(config, StdRng::seed_from_u64(7));

    for _ in 0..300 {
        budget(t0, max);
        check_formule(&g.generer());
    }
}

#[test]
fn fuzz_safe_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = vec!["0.5"; 2000].join("+");
    let r = Moteur::new().set_texte(&expr);
    budget(t0, max);

    assert_eq!(r, Resultat::Valeur(1000.0));
}

proptest! {
    #[test]
    fn prop_seed_quelconque(seed in any::<u64>(), profondeur in 0usize..5, operandes in 2usize..6) {
        let config = ConfigGenerateur::new(profondeur, operandes, 10.0, 1);
        let mut g = GenerateurFormules::new(config, StdRng::seed_from_u64(seed));
        let f = g.generer();
        prop_assert!(tokenize(&f).is_ok(), "formule={:?}", f);
        check_formule(&f);
    }

    #[test]
    fn prop_texte_arbitraire_ne_panique_pas(s in "[0-9 .+*/()#-]{0,24}") {
        let mut m = Moteur::new();
        let r = m.set_texte(&s);
        if s.is_empty() {
            prop_assert_eq!(r, Resultat::SansValeur);
        }
        if r == Resultat::Invalide && m.erreur() != Some(&ErreurNoyau::NonFini) {
            prop_assert!(m.message_erreur().is_some());
        }
    }
}
