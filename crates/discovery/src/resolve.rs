use buyerscope_lexicon::{normalize_words, Lexicon};
use rayon::prelude::*;

use crate::catalog::{canonical_domain, Catalog};
use crate::config::ResolutionConfig;
use crate::model::{CandidateMatch, MatchStatus, Resolution, UploadRow};

/// Resolve rows with the built-in lexicon and default thresholds.
pub fn resolve(rows: &[UploadRow], catalog: &Catalog) -> Vec<UploadRow> {
    resolve_with(Lexicon::builtin(), &ResolutionConfig::default(), rows, catalog)
}

/// Match every row against the catalog. Output order equals input order and
/// each row's raw fields are carried over unchanged.
pub fn resolve_with(
    lexicon: &Lexicon,
    config: &ResolutionConfig,
    rows: &[UploadRow],
    catalog: &Catalog,
) -> Vec<UploadRow> {
    let prepared: Vec<Prepared> = catalog
        .companies()
        .iter()
        .map(|c| Prepared {
            id: &c.id,
            name: NormalizedName::new(lexicon, &c.name),
            country: c.hq_country.as_deref().and_then(|h| lexicon.country_code(h)),
            domain: c.domain.as_deref(),
        })
        .collect();

    let out: Vec<UploadRow> = rows
        .par_iter()
        .map(|row| {
            let mut row = row.clone();
            row.resolution = Some(resolve_row(lexicon, config, &row, &prepared));
            row
        })
        .collect();

    log::debug!(
        "resolve: {} rows against {} companies",
        out.len(),
        catalog.len()
    );
    out
}

struct Prepared<'a> {
    id: &'a str,
    name: NormalizedName,
    country: Option<String>,
    domain: Option<&'a str>,
}

struct NormalizedName {
    text: String,
    sorted: String,
}

impl NormalizedName {
    fn new(lexicon: &Lexicon, raw: &str) -> Self {
        let text = normalize_company_name(lexicon, raw);
        let mut tokens: Vec<&str> = text.split(' ').collect();
        tokens.sort_unstable();
        let sorted = tokens.join(" ");
        Self { text, sorted }
    }
}

fn resolve_row(
    lexicon: &Lexicon,
    config: &ResolutionConfig,
    row: &UploadRow,
    catalog: &[Prepared<'_>],
) -> Resolution {
    let Some(raw_name) = row.name.as_deref() else {
        return Resolution::unresolved();
    };
    let name = NormalizedName::new(lexicon, raw_name);
    if name.text.is_empty() {
        return Resolution::unresolved();
    }
    let country = row.country.as_deref().and_then(|c| lexicon.country_code(c));
    let email_domain = row
        .email
        .as_deref()
        .and_then(|e| e.rsplit_once('@'))
        .map(|(_, d)| canonical_domain(d))
        .filter(|d| !d.is_empty() && !lexicon.is_free_mail_domain(d));

    let mut candidates: Vec<CandidateMatch> = catalog
        .iter()
        .filter_map(|company| {
            let mut score = name_similarity(&name, &company.name);
            if let (Some(a), Some(b)) = (&country, &company.country) {
                let same = if a == b { 1.0 } else { 0.0 };
                score = (1.0 - config.country_weight) * score + config.country_weight * same;
            }
            if email_domain.is_some() && email_domain.as_deref() == company.domain {
                score = score.max(config.domain_match_score);
            }
            (score >= config.match_threshold).then(|| CandidateMatch {
                company_id: company.id.to_string(),
                score,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.company_id.cmp(&b.company_id))
    });

    classify(candidates, config.tie_margin)
}

/// Matched when the best candidate is clear of the rest by more than
/// `tie_margin`; Multiple when others fall within it; New with no candidate.
fn classify(candidates: Vec<CandidateMatch>, tie_margin: f64) -> Resolution {
    let Some(top) = candidates.first() else {
        return Resolution::new_record();
    };
    let top_score = top.score;
    let tied: Vec<CandidateMatch> = candidates
        .iter()
        .filter(|c| top_score - c.score <= tie_margin)
        .cloned()
        .collect();

    if tied.len() > 1 {
        return Resolution {
            status: MatchStatus::Multiple,
            matched_company_id: None,
            confidence: None,
            candidates: tied,
        };
    }

    Resolution {
        status: MatchStatus::Matched,
        matched_company_id: Some(top.company_id.clone()),
        confidence: Some(top_score),
        candidates: Vec::new(),
    }
}

/// Case-fold, turn punctuation into spaces, join runs of single letters
/// (`S.A.` → `sa`), then drop a leading "the" and trailing legal suffixes.
/// At least one token survives the stripping.
pub fn normalize_company_name(lexicon: &Lexicon, raw: &str) -> String {
    let words = normalize_words(raw);
    let mut tokens: Vec<String> = Vec::new();
    let mut run = String::new();
    for word in words.split(' ').filter(|w| !w.is_empty()) {
        if word.chars().count() == 1 {
            run.push_str(word);
            continue;
        }
        if !run.is_empty() {
            tokens.push(std::mem::take(&mut run));
        }
        tokens.push(word.to_string());
    }
    if !run.is_empty() {
        tokens.push(run);
    }

    if tokens.len() > 1 && tokens[0] == "the" {
        tokens.remove(0);
    }
    while tokens.len() > 1
        && tokens
            .last()
            .is_some_and(|t| lexicon.is_legal_suffix(t))
    {
        tokens.pop();
    }
    tokens.join(" ")
}

/// Jaro-Winkler of the normalized names or of their sorted-token forms,
/// whichever is higher. Bounded in [0, 1].
fn name_similarity(a: &NormalizedName, b: &NormalizedName) -> f64 {
    if a.text == b.text {
        return 1.0;
    }
    strsim::jaro_winkler(&a.text, &b.text).max(strsim::jaro_winkler(&a.sorted, &b.sorted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::company;
    use crate::model::Company;

    fn row(name: &str) -> UploadRow {
        UploadRow {
            name: Some(name.into()),
            ..UploadRow::default()
        }
    }

    fn with_country(mut c: Company, hq: &str) -> Company {
        c.hq_country = Some(hq.into());
        c
    }

    fn catalog() -> Catalog {
        let mut kerala = with_country(company("c1", "Kerala Spice Exports Pvt Ltd", &["0904"]), "IN");
        kerala.domain = Some("keralaspice.com".into());
        Catalog::new(vec![
            kerala,
            with_country(company("c2", "Malabar Trading Co", &["0904"]), "IN"),
            with_country(company("c3", "Hamburg Gewürz GmbH", &["0910"]), "DE"),
            with_country(company("c4", "Hamburg Gewurz AG", &["0910"]), "DE"),
        ])
        .unwrap()
    }

    fn status(rows: &[UploadRow], i: usize) -> MatchStatus {
        rows[i].resolution.as_ref().unwrap().status
    }

    #[test]
    fn normalize_names() {
        let lex = Lexicon::builtin();
        assert_eq!(normalize_company_name(lex, "The Kerala Spice Co., Ltd."), "kerala spice");
        assert_eq!(normalize_company_name(lex, "Olam S.A."), "olam");
        assert_eq!(normalize_company_name(lex, "A.B.C. Foods"), "abc foods");
        assert_eq!(normalize_company_name(lex, "The Company"), "company");
        assert_eq!(normalize_company_name(lex, "  ...  "), "");
    }

    #[test]
    fn exact_name_after_normalization_matches() {
        let out = resolve(&[row("KERALA SPICE EXPORTS PRIVATE LIMITED")], &catalog());
        let r = out[0].resolution.as_ref().unwrap();
        assert_eq!(r.status, MatchStatus::Matched);
        assert_eq!(r.matched_company_id.as_deref(), Some("c1"));
        assert_eq!(r.confidence_pct(), Some(100));
    }

    #[test]
    fn token_order_does_not_matter() {
        let out = resolve(&[row("Trading Malabar")], &catalog());
        assert_eq!(status(&out, 0), MatchStatus::Matched);
        assert_eq!(
            out[0].resolution.as_ref().unwrap().matched_company_id.as_deref(),
            Some("c2")
        );
    }

    #[test]
    fn near_identical_companies_are_multiple() {
        let out = resolve(&[row("Hamburg Gewurz")], &catalog());
        let r = out[0].resolution.as_ref().unwrap();
        assert_eq!(r.status, MatchStatus::Multiple);
        assert!(r.matched_company_id.is_none());
        let ids: Vec<&str> = r.candidates.iter().map(|c| c.company_id.as_str()).collect();
        assert_eq!(ids, vec!["c4", "c3"]);
    }

    #[test]
    fn unknown_company_is_new() {
        let out = resolve(&[row("Saigon Cinnamon Partners")], &catalog());
        assert_eq!(status(&out, 0), MatchStatus::New);
        assert!(out[0].resolution.as_ref().unwrap().confidence.is_none());
    }

    #[test]
    fn missing_or_blank_name_is_unresolved() {
        let rows = vec![UploadRow::default(), row("   "), row("--")];
        let out = resolve(&rows, &catalog());
        for i in 0..3 {
            assert_eq!(status(&out, i), MatchStatus::Unresolved);
        }
    }

    #[test]
    fn country_mismatch_lowers_score() {
        let mut r = row("Malabar Trading");
        r.country = Some("Germany".into());
        let out = resolve(&[r], &catalog());
        assert_eq!(status(&out, 0), MatchStatus::New);

        let mut r = row("Malabar Trading");
        r.country = Some("India".into());
        let out = resolve(&[r], &catalog());
        assert_eq!(status(&out, 0), MatchStatus::Matched);
    }

    #[test]
    fn country_aliases_agree_with_iso_code() {
        let catalog = Catalog::new(vec![with_country(
            company("c1", "Thames Spice Importers Ltd", &["0904"]),
            "GB",
        )])
        .unwrap();
        for country in ["United Kingdom", "UK", "uk", "GB"] {
            let mut r = row("Thames Spice Importers");
            r.country = Some(country.into());
            let out = resolve(&[r], &catalog);
            assert_eq!(status(&out, 0), MatchStatus::Matched, "country {country}");
        }

        // A region is not a country: no blend, the name alone decides
        let mut r = row("Thames Spice Importers");
        r.country = Some("EU".into());
        let out = resolve(&[r], &catalog);
        assert_eq!(status(&out, 0), MatchStatus::Matched);
    }

    #[test]
    fn company_email_domain_raises_score() {
        let mut r = row("KSE Exports");
        r.email = Some("buyer@WWW.KeralaSpice.com".into());
        let out = resolve(&[r], &catalog());
        let res = out[0].resolution.as_ref().unwrap();
        assert_eq!(res.status, MatchStatus::Matched);
        assert_eq!(res.matched_company_id.as_deref(), Some("c1"));
        assert_eq!(res.confidence, Some(0.95));

        let mut r = row("KSE Exports");
        r.email = Some("kse@gmail.com".into());
        let out = resolve(&[r], &catalog());
        assert_eq!(status(&out, 0), MatchStatus::New);
    }

    #[test]
    fn extra_columns_and_order_are_preserved() {
        let mut a = row("Malabar Trading Co");
        a.extra.insert("owner".into(), serde_json::json!("priya"));
        let rows = vec![a, row("Unknown Ltd"), row("Kerala Spice Exports")];
        let out = resolve(&rows, &catalog());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].extra["owner"], "priya");
        assert_eq!(out[2].name.as_deref(), Some("Kerala Spice Exports"));
        assert_eq!(status(&out, 1), MatchStatus::New);
    }

    #[test]
    fn classify_margin_boundaries() {
        let cand = |id: &str, score: f64| CandidateMatch {
            company_id: id.into(),
            score,
        };
        let r = classify(vec![cand("a", 0.95), cand("b", 0.90)], 0.03);
        assert_eq!(r.status, MatchStatus::Matched);
        assert_eq!(r.confidence, Some(0.95));

        let r = classify(vec![cand("a", 0.95), cand("b", 0.93)], 0.03);
        assert_eq!(r.status, MatchStatus::Multiple);
        assert_eq!(r.candidates.len(), 2);

        assert_eq!(classify(Vec::new(), 0.03).status, MatchStatus::New);
    }
}
