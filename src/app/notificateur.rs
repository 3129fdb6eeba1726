//! src/app/notificateur.rs
//!
//! Abonnements typés aux événements d’une saisie.
//!
//! - Un type d’événement => une liste ordonnée d’abonnés.
//! - `abonner` rend une poignée ; on se désabonne par poignée (pas par comparaison de closures).
//! - Diffusion dans l’ordre d’abonnement.

use std::collections::BTreeMap;

use tracing::trace;

use crate::noyau::Resultat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeEvenement {
    TexteChange,
    ValeurChangee,
    ValiditeChangee,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Evenement {
    TexteChange(String),
    ValeurChangee(Resultat),
    ValiditeChangee(bool),
}

impl Evenement {
    pub fn type_evenement(&self) -> TypeEvenement {
        match self {
            Evenement::TexteChange(_) => TypeEvenement::TexteChange,
            Evenement::ValeurChangee(_) => TypeEvenement::ValeurChangee,
            Evenement::ValiditeChangee(_) => TypeEvenement::ValiditeChangee,
        }
    }
}

/// Poignée d’abonnement (unique par notificateur).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Abonnement {
    type_evenement: TypeEvenement,
    id: u64,
}

type Ecouteur = Box<dyn FnMut(&Evenement)>;

#[derive(Default)]
pub struct Notificateur {
    prochain_id: u64,
    ecouteurs: BTreeMap<TypeEvenement, Vec<(u64, Ecouteur)>>,
}

impl Notificateur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abonner(
        &mut self,
        type_evenement: TypeEvenement,
        ecouteur: impl FnMut(&Evenement) + 'static,
    ) -> Abonnement {
        let id = self.prochain_id;
        self.prochain_id += 1;
        self.ecouteurs
            .entry(type_evenement)
            .or_default()
            .push((id, Box::new(ecouteur)));
        Abonnement { type_evenement, id }
    }

    /// `false` si la poignée n’est (plus) abonnée.
    pub fn desabonner(&mut self, abonnement: Abonnement) -> bool {
        let Some(liste) = self.ecouteurs.get_mut(&abonnement.type_evenement) else {
            return false;
        };
        let avant = liste.len();
        liste.retain(|(id, _)| *id != abonnement.id);
        liste.len() != avant
    }

    pub fn diffuser(&mut self, evenement: &Evenement) {
        let type_evenement = evenement.type_evenement();
        if let Some(liste) = self.ecouteurs.get_mut(&type_evenement) {
            trace!(?type_evenement, abonnes = liste.len(), "diffusion");
            for (_, ecouteur) in liste.iter_mut() {
                ecouteur(evenement);
            }
        }
    }

    #[cfg(test)]
    pub fn nb_abonnes(&self, type_evenement: TypeEvenement) -> usize {
        self.ecouteurs.get(&type_evenement).map_or(0, Vec::len)
    }

    /// Libère tous les abonnés (destruction de la saisie).
    pub fn vider(&mut self) {
        self.ecouteurs.clear();
    }
}
