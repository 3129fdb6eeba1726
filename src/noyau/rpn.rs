// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - Signe (unaire) : un opérateur est un signe s’il n’y a pas de jeton avant,
//   ou si le jeton précédent est '('.
//    - '-' => Neg (opérateur distinct du '-' binaire)
//    - '+' => ignoré
//    - '*' '/' => erreur
// - Neg a la priorité de + et -, mais sort toujours devant un binaire entrant.
//
// NOTE:
// - La division par zéro donne ±inf ici ; c’est l’appelant qui refuse un résultat non fini.

use super::erreur::ErreurNoyau;
use super::jetons::{Op, Tok};

/// Élément de la sortie postfixée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Bin(Op),
    Neg,
}

/// Pile d’opérateurs (interne au convertisseur).
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pile {
    Bin(Op),
    Neg,
    LPar,
}

fn priorite(p: Pile) -> u8 {
    match p {
        Pile::LPar => 1,
        Pile::Neg | Pile::Bin(Op::Plus) | Pile::Bin(Op::Minus) => 2,
        Pile::Bin(Op::Star) | Pile::Bin(Op::Slash) => 3,
    }
}

impl Pile {
    /// Opérateur à sortir tel quel ; `None` pour une parenthèse.
    fn vers_rpn(self) -> Option<Rpn> {
        match self {
            Pile::Bin(op) => Some(Rpn::Bin(op)),
            Pile::Neg => Some(Rpn::Neg),
            Pile::LPar => None,
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Op(Minus), LPar, Num(2), Op(Plus), Num(3), RPar, Op(Star), Num(4)]
///   rpn:    [Num(2), Num(3), Bin(Plus), Neg, Num(4), Bin(Star)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurNoyau> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    let mut prev: Option<Tok> = None;

    for &tok in tokens {
        match tok {
            Tok::Num(n) => out.push(Rpn::Num(n)),

            Tok::LPar => ops.push(Pile::LPar),

            Tok::RPar => {
                // dépile jusqu’à '(' (jetée, jamais sortie)
                let mut trouvee = false;
                while let Some(top) = ops.pop() {
                    match top.vers_rpn() {
                        Some(r) => out.push(r),
                        None => {
                            trouvee = true;
                            break;
                        }
                    }
                }
                if !trouvee {
                    return Err(ErreurNoyau::FermanteOrpheline);
                }
            }

            Tok::Op(op) => {
                let signe = matches!(prev, None | Some(Tok::LPar));

                if signe {
                    match op {
                        Op::Minus => ops.push(Pile::Neg),
                        Op::Plus => {}
                        Op::Star | Op::Slash => {
                            return Err(ErreurNoyau::UnaireInvalide(op.symbole()));
                        }
                    }
                } else {
                    let entrant = Pile::Bin(op);
                    while let Some(&top) = ops.last() {
                        if top == Pile::Neg || priorite(top) >= priorite(entrant) {
                            // LPar a la priorité la plus basse : jamais dépilée ici
                            if let Some(r) = top.vers_rpn() {
                                out.push(r);
                            }
                            ops.pop();
                        } else {
                            break;
                        }
                    }
                    ops.push(entrant);
                }
            }
        }

        prev = Some(tok);
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top.vers_rpn() {
            Some(r) => out.push(r),
            None => return Err(ErreurNoyau::OuvranteOrpheline),
        }
    }

    Ok(out)
}

fn applique(op: Op, a: f64, b: f64) -> f64 {
    match op {
        Op::Plus => a + b,
        Op::Minus => a - b,
        Op::Star => a * b,
        Op::Slash => a / b,
    }
}

/// Évalue une RPN sur une pile de valeurs.
///
/// Succès = exactement une valeur restante, et finie.
pub fn eval_rpn(rpn: &[Rpn]) -> Result<f64, ErreurNoyau> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for item in rpn {
        match *item {
            Rpn::Num(n) => st.push(n),

            Rpn::Neg => {
                let x = st.pop().ok_or(ErreurNoyau::OperandeManquant)?;
                st.push(-x);
            }

            Rpn::Bin(op) => {
                // premier dépilé = opérande de droite
                let b = st.pop().ok_or(ErreurNoyau::OperandeManquant)?;
                let a = st.pop().ok_or(ErreurNoyau::OperandeManquant)?;
                st.push(applique(op, a, b));
            }
        }
    }

    match st.as_slice() {
        [v] if v.is_finite() => Ok(*v),
        [_] => Err(ErreurNoyau::NonFini),
        reste => Err(ErreurNoyau::ExpressionIncomplete(reste.len())),
    }
}

/// Format utilitaire (démarche) : RPN en texte, Neg noté "neg".
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(n) => format!("{n}"),
            Rpn::Bin(op) => op.symbole().to_string(),
            Rpn::Neg => "neg".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
