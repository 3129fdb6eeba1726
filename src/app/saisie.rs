//! src/app/saisie.rs
//!
//! Cœur commun des deux saisies (numérique / calcul).
//!
//! Rôle : texte + résultat + focus + abonnés, et style de bordure.
//! Ce qui change d’une saisie à l’autre : l’interprétation du texte (stratégie injectée).
//!
//! Contrats :
//! - ValeurChangee seulement si le résultat change
//! - ValiditeChangee seulement si la validité bascule
//! - TexteChange seulement si le texte change (réaffecter le même texte est silencieux)

use tracing::debug;

use super::notificateur::{Abonnement, Evenement, Notificateur, TypeEvenement};
use crate::noyau::{DemarcheNoyau, Moteur, Resultat};

/// Texte -> Resultat.
pub trait Interpretation {
    fn interpreter(&mut self, texte: &str) -> Resultat;

    /// Message de diagnostic du dernier texte interprété (si mal formé).
    fn message(&self) -> Option<String> {
        None
    }

    /// Valeur montrée à côté du champ ; `None` : pas d’affichage de valeur.
    fn valeur_affichee(&self) -> Option<Resultat> {
        None
    }
}

/// Nombre saisi directement (pas de formule).
#[derive(Clone, Debug, Default)]
pub struct InterpretationNumerique;

impl Interpretation for InterpretationNumerique {
    fn interpreter(&mut self, texte: &str) -> Resultat {
        if texte.is_empty() {
            return Resultat::SansValeur;
        }
        match texte.trim().parse::<f64>() {
            // "inf" / "NaN" sont acceptés par parse : pas par nous
            Ok(v) if v.is_finite() => Resultat::Valeur(v),
            _ => Resultat::Invalide,
        }
    }
}

/// Formule évaluée par le moteur.
#[derive(Clone, Debug, Default)]
pub struct InterpretationCalcul {
    moteur: Moteur,
}

impl InterpretationCalcul {
    pub fn new() -> Self {
        Self {
            moteur: Moteur::new(),
        }
    }

    pub fn demarche(&self) -> DemarcheNoyau {
        self.moteur.demarche()
    }
}

impl Interpretation for InterpretationCalcul {
    fn interpreter(&mut self, texte: &str) -> Resultat {
        self.moteur.set_texte(texte)
    }

    fn message(&self) -> Option<String> {
        self.moteur.message_erreur()
    }

    fn valeur_affichee(&self) -> Option<Resultat> {
        Some(self.moteur.resultat())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bordure {
    Aucune,
    Focus,
    Invalide,
    FocusInvalide,
}

pub struct Saisie<I: Interpretation> {
    texte: String,
    resultat: Resultat,
    focus: bool,
    notificateur: Notificateur,
    interpretation: I,
}

impl<I: Interpretation> Saisie<I> {
    pub fn new(interpretation: I) -> Self {
        Self {
            texte: String::new(),
            resultat: Resultat::SansValeur,
            focus: false,
            notificateur: Notificateur::new(),
            interpretation,
        }
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn valeur(&self) -> Resultat {
        self.resultat
    }

    pub fn est_valide(&self) -> bool {
        self.resultat.est_valide()
    }

    pub fn message(&self) -> Option<String> {
        self.interpretation.message()
    }

    pub fn interpretation(&self) -> &I {
        &self.interpretation
    }

    /// Nouveau texte (frappe ou programme).
    pub fn set_texte(&mut self, texte: &str) {
        if texte == self.texte {
            return;
        }
        self.texte = texte.to_string();
        self.analyser();
        self.notificateur
            .diffuser(&Evenement::TexteChange(self.texte.clone()));
    }

    /// Écrit la valeur sous forme de texte, si elle diffère de la valeur courante.
    pub fn set_valeur(&mut self, v: f64) {
        if !v.is_finite() || self.valeur() == Resultat::Valeur(v) {
            return;
        }
        self.set_texte(&v.to_string());
    }

    fn analyser(&mut self) {
        let etait_valide = self.est_valide();
        let resultat = self.interpretation.interpreter(&self.texte);

        if resultat != self.resultat {
            debug!(texte = %self.texte, ?resultat, "saisie: valeur changée");
            self.resultat = resultat;
            self.notificateur
                .diffuser(&Evenement::ValeurChangee(resultat));
        }

        let valide = self.est_valide();
        if valide != etait_valide {
            self.notificateur
                .diffuser(&Evenement::ValiditeChangee(valide));
        }
    }

    pub fn set_focus(&mut self, focus: bool) {
        self.focus = focus;
    }

    /// Style de bordure : l’invalide ne s’affiche que sur un texte non vide.
    pub fn bordure(&self) -> Bordure {
        let ok = self.est_valide() || self.texte.is_empty();
        match (ok, self.focus) {
            (true, true) => Bordure::Focus,
            (true, false) => Bordure::Aucune,
            (false, true) => Bordure::FocusInvalide,
            (false, false) => Bordure::Invalide,
        }
    }

    pub fn abonner(
        &mut self,
        type_evenement: TypeEvenement,
        ecouteur: impl FnMut(&Evenement) + 'static,
    ) -> Abonnement {
        self.notificateur.abonner(type_evenement, ecouteur)
    }

    pub fn desabonner(&mut self, abonnement: Abonnement) -> bool {
        self.notificateur.desabonner(abonnement)
    }

    /// Libère les abonnés ; la saisie reste utilisable mais muette.
    pub fn detruire(&mut self) {
        self.notificateur.vider();
    }
}

pub type SaisieNumerique = Saisie<InterpretationNumerique>;
pub type SaisieCalcul = Saisie<InterpretationCalcul>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn espionner<I: Interpretation>(s: &mut Saisie<I>) -> Rc<RefCell<Vec<Evenement>>> {
        let j = Rc::new(RefCell::new(Vec::new()));
        for t in [
            TypeEvenement::TexteChange,
            TypeEvenement::ValeurChangee,
            TypeEvenement::ValiditeChangee,
        ] {
            let jj = Rc::clone(&j);
            s.abonner(t, move |e: &Evenement| jj.borrow_mut().push(e.clone()));
        }
        j
    }

    #[test]
    fn numerique_interpretation() {
        let mut n = InterpretationNumerique;
        assert_eq!(n.interpreter(""), Resultat::SansValeur);
        assert_eq!(n.interpreter("12.5"), Resultat::Valeur(12.5));
        assert_eq!(n.interpreter(" -3 "), Resultat::Valeur(-3.0));
        assert_eq!(n.interpreter("1+1"), Resultat::Invalide);
        assert_eq!(n.interpreter("inf"), Resultat::Invalide);
        assert_eq!(n.interpreter("NaN"), Resultat::Invalide);
    }

    #[test]
    fn calcul_evenements_dans_l_ordre() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        let j = espionner(&mut s);

        s.set_texte("2*(3+4)");
        assert_eq!(
            *j.borrow(),
            vec![
                Evenement::ValeurChangee(Resultat::Valeur(14.0)),
                Evenement::ValiditeChangee(true),
                Evenement::TexteChange("2*(3+4)".into()),
            ]
        );
    }

    #[test]
    fn meme_texte_silencieux() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        s.set_texte("2+3");
        let j = espionner(&mut s);

        s.set_texte("2+3");
        assert!(j.borrow().is_empty());
        assert_eq!(s.valeur(), Resultat::Valeur(5.0));
    }

    #[test]
    fn meme_valeur_texte_different() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        s.set_texte("2+3");
        let j = espionner(&mut s);

        s.set_texte("1+4");
        assert_eq!(*j.borrow(), vec![Evenement::TexteChange("1+4".into())]);
    }

    #[test]
    fn invalide_puis_vide() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        s.set_texte("5");
        let j = espionner(&mut s);

        s.set_texte("5/");
        assert_eq!(s.valeur(), Resultat::Invalide);
        assert!(s.message().is_some());

        s.set_texte("");
        assert_eq!(s.valeur(), Resultat::SansValeur);
        assert_eq!(s.message(), None);

        assert_eq!(
            *j.borrow(),
            vec![
                Evenement::ValeurChangee(Resultat::Invalide),
                Evenement::ValiditeChangee(false),
                Evenement::TexteChange("5/".into()),
                Evenement::ValeurChangee(Resultat::SansValeur),
                Evenement::TexteChange("".into()),
            ]
        );
    }

    #[test]
    fn set_valeur_reecrit_le_texte() {
        let mut s = SaisieNumerique::new(InterpretationNumerique);
        s.set_valeur(2.5);
        assert_eq!(s.texte(), "2.5");
        assert_eq!(s.valeur(), Resultat::Valeur(2.5));

        let j = espionner(&mut s);
        s.set_valeur(2.5);
        assert!(j.borrow().is_empty());

        s.set_valeur(f64::NAN);
        assert_eq!(s.texte(), "2.5");
    }

    #[test]
    fn bordures() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        assert_eq!(s.bordure(), Bordure::Aucune);

        s.set_focus(true);
        assert_eq!(s.bordure(), Bordure::Focus);

        s.set_texte("(");
        assert_eq!(s.bordure(), Bordure::FocusInvalide);

        s.set_focus(false);
        assert_eq!(s.bordure(), Bordure::Invalide);

        s.set_texte("");
        assert_eq!(s.bordure(), Bordure::Aucune);
    }

    #[test]
    fn detruire_rend_muet() {
        let mut s = SaisieNumerique::new(InterpretationNumerique);
        let j = espionner(&mut s);
        s.detruire();
        s.set_texte("3");
        assert!(j.borrow().is_empty());
        assert_eq!(s.valeur(), Resultat::Valeur(3.0));
    }

    #[test]
    fn desabonnement() {
        let mut s = SaisieNumerique::new(InterpretationNumerique);
        let j = Rc::new(RefCell::new(0));
        let jj = Rc::clone(&j);
        let a = s.abonner(TypeEvenement::TexteChange, move |_| *jj.borrow_mut() += 1);

        s.set_texte("1");
        assert!(s.desabonner(a));
        s.set_texte("2");
        assert_eq!(*j.borrow(), 1);
    }

    #[test]
    fn demarche_du_calcul() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        s.set_texte("-(1+2)");
        assert_eq!(s.interpretation().demarche().rpn, "1 2 + neg");
    }

    #[test]
    fn valeur_affichee_par_le_calcul_seulement() {
        let mut s = SaisieCalcul::new(InterpretationCalcul::new());
        assert_eq!(s.interpretation().valeur_affichee(), Some(Resultat::SansValeur));

        s.set_texte("7/2");
        assert_eq!(s.interpretation().valeur_affichee(), Some(Resultat::Valeur(3.5)));
        assert_eq!(s.interpretation().valeur_affichee(), Some(s.valeur()));

        s.set_texte("7/0");
        assert_eq!(s.interpretation().valeur_affichee(), Some(Resultat::Invalide));

        let mut n = SaisieNumerique::new(InterpretationNumerique);
        n.set_texte("7");
        assert_eq!(n.interpretation().valeur_affichee(), None);
    }
}
