// src/noyau/jetons.rs
//
// Tokenisation par curseur.
// Vocabulaire fermé :
// - nombres : suite de chiffres et de points (ex: 12, 3.5, .5)
// - opérateurs + - * /
// - parenthèses ( )
// - espaces (séparateurs, jamais émis)
//
// Tout autre caractère est une erreur lexicale.

use super::erreur::ErreurNoyau;

/// Opérateur binaire (ou signe, selon la position : c’est rpn.rs qui tranche).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Op {
    pub fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Op),
    LPar,
    RPar,
}

fn est_car_nombre(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Opérateur ou parenthèse : un jeton d’un seul caractère.
fn jeton_symbole(c: char) -> Option<Tok> {
    match c {
        '(' => Some(Tok::LPar),
        ')' => Some(Tok::RPar),
        _ => Op::depuis_char(c).map(Tok::Op),
    }
}

/// Curseur de lecture sur le texte source.
///
/// `pos` est un indice d’octet ; il avance uniquement sur ce qui a été consommé.
pub struct Jetonneur<'a> {
    texte: &'a str,
    pos: usize,
}

impl<'a> Jetonneur<'a> {
    pub fn new(texte: &'a str) -> Self {
        Self { texte, pos: 0 }
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jeton suivant, ou `None` en fin de texte.
    ///
    /// Un opérateur/parenthèse qui suit un nombre en cours ferme ce nombre
    /// sans être consommé : il sortira à l’appel suivant.
    pub fn prochain(&mut self) -> Result<Option<Tok>, ErreurNoyau> {
        // lexème = texte[debut..fin]
        let mut debut: Option<usize> = None;
        let mut fin = self.pos;

        while let Some(c) = self.texte[self.pos..].chars().next() {
            if c == ' ' {
                self.pos += 1;
                if debut.is_some() {
                    break;
                }
                continue;
            }

            if est_car_nombre(c) {
                if debut.is_none() {
                    debut = Some(self.pos);
                }
                self.pos += 1;
                fin = self.pos;
                continue;
            }

            match jeton_symbole(c) {
                Some(tok) => {
                    if debut.is_some() {
                        break;
                    }
                    self.pos += 1;
                    return Ok(Some(tok));
                }
                None => return Err(ErreurNoyau::CaractereInvalide(c)),
            }
        }

        match debut {
            Some(d) => {
                let lexeme = &self.texte[d..fin];
                lexeme
                    .parse::<f64>()
                    .map(|n| Some(Tok::Num(n)))
                    .map_err(|_| ErreurNoyau::NombreInvalide(lexeme.to_string()))
            }
            None => Ok(None),
        }
    }
}

/// Tokenize une chaîne complète en jetons (ordre source).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out = Vec::new();
    let mut lecteur = Jetonneur::new(s);
    while let Some(tok) = lecteur.prochain()? {
        out.push(tok);
    }
    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
