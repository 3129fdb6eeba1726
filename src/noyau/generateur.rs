//! Générateur de formules aléatoires (pour marteler le moteur).
//!
//! Descente récursive sur une grammaire pondérée :
//! - profondeur max atteinte => nombre
//! - sinon : nombre | groupe arithmétique | parenthèses, avec des seuils
//!   différents au niveau 0 (groupes favorisés) et plus bas (nombres favorisés)
//!
//! La source aléatoire est injectée : même seed => mêmes formules.
//! Chaque formule produite n’utilise que le vocabulaire de jetons.rs, sous forme fermée.

use rand::Rng;

/// Seuils cumulés (tirage uniforme dans [0, 1)).
#[derive(Clone, Copy, Debug)]
struct Seuils {
    nombre: f64,
    arithmetique: f64,
}

const SEUILS_RACINE: Seuils = Seuils {
    nombre: 0.1,
    arithmetique: 0.9,
};

const SEUILS_INTERNES: Seuils = Seuils {
    nombre: 0.5,
    arithmetique: 1.0,
};

/// Opérateurs et seuils cumulés : + et - plus fréquents que * et /.
const OPERATIONS: [(char, f64); 4] = [('+', 0.3), ('-', 0.6), ('*', 0.8), ('/', 1.0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Forme {
    Nombre,
    Arithmetique,
    Parentheses,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigGenerateur {
    /// Profondeur de récursion max (au-delà : nombre).
    pub max_profondeur: usize,
    /// Nombre max d’opérandes par groupe arithmétique (au moins 2).
    pub max_operandes: usize,
    /// Les littéraux sont tirés dans [0, max_nombre).
    pub max_nombre: f64,
    /// Chiffres après la virgule des littéraux.
    pub chiffres: usize,
    /// Probabilité d’un signe '-' en tête de groupe.
    pub proba_moins: f64,
    /// Probabilité d’un signe '+' en tête de groupe.
    pub proba_plus: f64,
}

impl Default for ConfigGenerateur {
    fn default() -> Self {
        Self {
            max_profondeur: 3,
            max_operandes: 4,
            max_nombre: 10.0,
            chiffres: 0,
            proba_moins: 0.5,
            proba_plus: 0.1,
        }
    }
}

impl ConfigGenerateur {
    pub fn new(max_profondeur: usize, max_operandes: usize, max_nombre: f64, chiffres: usize) -> Self {
        Self {
            max_profondeur,
            max_operandes,
            max_nombre,
            chiffres,
            ..Self::default()
        }
        .borne()
    }

    pub fn with_signes(mut self, proba_moins: f64, proba_plus: f64) -> Self {
        self.proba_moins = proba_moins;
        self.proba_plus = proba_plus;
        self.borne()
    }

    /// Garde-fous : au moins 2 opérandes, probabilités dans [0, 1], max_nombre ≥ 0.
    fn borne(mut self) -> Self {
        self.max_operandes = self.max_operandes.max(2);
        self.proba_moins = self.proba_moins.clamp(0.0, 1.0);
        self.proba_plus = self.proba_plus.clamp(0.0, 1.0 - self.proba_moins);
        if !self.max_nombre.is_finite() || self.max_nombre < 0.0 {
            self.max_nombre = 0.0;
        }
        self
    }
}

pub struct GenerateurFormules<R: Rng> {
    config: ConfigGenerateur,
    rng: R,
}

impl<R: Rng> GenerateurFormules<R> {
    pub fn new(config: ConfigGenerateur, rng: R) -> Self {
        Self {
            config: config.borne(),
            rng,
        }
    }

    /// Nouvelle formule (niveau 0).
    pub fn generer(&mut self) -> String {
        self.generer_a(0)
    }

    fn generer_a(&mut self, profondeur: usize) -> String {
        if profondeur >= self.config.max_profondeur {
            return self.nombre();
        }

        match self.forme(profondeur) {
            Forme::Nombre => {
                let signe = if profondeur == 0 { self.signe() } else { "" };
                format!("{signe}{}", self.nombre())
            }
            Forme::Arithmetique => self.arithmetique(profondeur),
            Forme::Parentheses => self.parentheses(profondeur),
        }
    }

    fn forme(&mut self, profondeur: usize) -> Forme {
        let seuils = if profondeur == 0 {
            SEUILS_RACINE
        } else {
            SEUILS_INTERNES
        };
        let x: f64 = self.rng.gen();
        if x < seuils.nombre {
            Forme::Nombre
        } else if x < seuils.arithmetique {
            Forme::Arithmetique
        } else {
            Forme::Parentheses
        }
    }

    fn nombre(&mut self) -> String {
        let x: f64 = self.rng.gen::<f64>() * self.config.max_nombre;
        format!("{:.*}", self.config.chiffres, x)
    }

    fn signe(&mut self) -> &'static str {
        let x: f64 = self.rng.gen();
        if x < self.config.proba_moins {
            "-"
        } else if x < self.config.proba_moins + self.config.proba_plus {
            "+"
        } else {
            ""
        }
    }

    fn operation(&mut self) -> char {
        let x: f64 = self.rng.gen();
        OPERATIONS
            .iter()
            .find(|(_, seuil)| x < *seuil)
            .map_or('/', |(op, _)| *op)
    }

    fn arithmetique(&mut self, profondeur: usize) -> String {
        let operandes = self.rng.gen_range(2..=self.config.max_operandes);

        let mut formule = String::new();
        if profondeur > 0 {
            formule.push('(');
        }
        formule.push_str(self.signe());

        for i in 0..operandes {
            if i > 0 {
                formule.push(self.operation());
            }
            let sous = self.generer_a(profondeur + 1);
            formule.push_str(&sous);
        }

        if profondeur > 0 {
            formule.push(')');
        }
        formule
    }

    fn parentheses(&mut self, profondeur: usize) -> String {
        let signe = self.signe();
        let sous = self.generer_a(profondeur + 1);
        format!("({signe}{sous})")
    }
}

/// Raccourci : une formule, source aléatoire fournie par l’appelant.
pub fn generer<R: Rng>(config: ConfigGenerateur, rng: &mut R) -> String {
    GenerateurFormules::new(config, rng).generer()
}
