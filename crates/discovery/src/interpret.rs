use buyerscope_lexicon::{Lexicon, Term};

use crate::assumptions::{AssumptionSet, HsEntry, DEFAULT_LOOKBACK_DAYS};

/// Interpret a free-text query with the built-in lexicon. Never fails.
pub fn interpret(text: &str) -> AssumptionSet {
    interpret_with(Lexicon::builtin(), text)
}

pub fn interpret_with(lexicon: &Lexicon, text: &str) -> AssumptionSet {
    let tokens = tokenize(text);
    let mut set = AssumptionSet::default();
    let mut lookback: Option<u32> = None;

    let mut i = 0;
    while i < tokens.len() {
        if let Some((term, used)) = longest_match(lexicon, &tokens[i..]) {
            match term {
                Term::Commodity(entry) => add_hs(&mut set.hs, &entry.hs_code, entry.confidence),
                Term::Market(code) => {
                    set.markets.insert(code.to_string());
                }
                Term::Cert(code) => {
                    set.certs.insert(code.to_string());
                }
                Term::Grade(grade) => {
                    set.grade.get_or_insert_with(|| grade.to_string());
                }
                Term::Pack(pack) => {
                    set.pack.get_or_insert_with(|| pack.to_string());
                }
            }
            i += used;
            continue;
        }

        if let Some((quantity, used)) = quantity_at(&tokens[i..]) {
            match quantity {
                Quantity::Days(days) if days > 0 => {
                    lookback.get_or_insert(days);
                }
                Quantity::Days(_) => {}
                Quantity::Tonnes(t) => {
                    set.moq_tonnes.get_or_insert(t);
                }
            }
            i += used;
            continue;
        }

        i += 1;
    }

    set.lookback_days = lookback.unwrap_or(DEFAULT_LOOKBACK_DAYS);
    log::debug!(
        "interpret: {} tokens -> {} hs, {} markets, {} certs, lookback {}d",
        tokens.len(),
        set.hs.len(),
        set.markets.len(),
        set.certs.len(),
        set.lookback_days
    );
    set
}

/// Lower-case tokens. Splits on whitespace and `, ; ( ) [ ] " '`, trims
/// punctuation at both ends and keeps inner `/`, `-` and numeric `.`.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || ",;()[]\"'".contains(c))
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .map(|t| strip_abbreviation_dots(&t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// "u.s.a" -> "usa"; dots in numbers ("5.5mt") stay.
fn strip_abbreviation_dots(token: &str) -> String {
    if token.contains('.') && !token.chars().any(|c| c.is_ascii_digit()) {
        token.replace('.', "")
    } else {
        token.to_string()
    }
}

/// Longest n-gram at the head of `tokens` that the lexicon knows.
fn longest_match<'a>(lexicon: &'a Lexicon, tokens: &[String]) -> Option<(Term<'a>, usize)> {
    let longest = lexicon.max_ngram().min(tokens.len());
    (1..=longest)
        .rev()
        .find_map(|n| lexicon.lookup(&tokens[..n].join(" ")).map(|term| (term, n)))
}

fn add_hs(hs: &mut Vec<HsEntry>, code: &str, confidence: f64) {
    match hs.iter_mut().find(|e| e.code == code) {
        Some(existing) => existing.confidence = existing.confidence.max(confidence),
        None => hs.push(HsEntry {
            code: code.to_string(),
            confidence,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quantity {
    Days(u32),
    Tonnes(f64),
}

/// A number with a unit, glued (`180d`, `20mt`) or as the next token
/// (`180 days`). Returns the quantity and the tokens consumed.
fn quantity_at(tokens: &[String]) -> Option<(Quantity, usize)> {
    let head = tokens.first()?;
    let split = head
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(head.len());
    let (number, glued) = head.split_at(split);
    if number.is_empty() || !number.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let (unit, used) = match glued.trim_start_matches('-') {
        "" => (tokens.get(1)?.as_str(), 2),
        unit => (unit, 1),
    };

    let quantity = match unit {
        "d" | "day" | "days" => Quantity::Days(number.parse().ok()?),
        "w" | "wk" | "week" | "weeks" => Quantity::Days(number.parse::<u32>().ok()?.checked_mul(7)?),
        "month" | "months" => Quantity::Days(number.parse::<u32>().ok()?.checked_mul(30)?),
        "y" | "yr" | "year" | "years" => Quantity::Days(number.parse::<u32>().ok()?.checked_mul(365)?),
        "mt" | "t" | "ton" | "tons" | "tonne" | "tonnes" => {
            let tonnes: f64 = number.parse().ok()?;
            if !tonnes.is_finite() || tonnes <= 0.0 {
                return None;
            }
            Quantity::Tonnes(tonnes)
        }
        _ => return None,
    };
    Some((quantity, used))
}
