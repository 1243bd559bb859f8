use std::collections::HashSet;

use buyerscope_lexicon::Lexicon;

use crate::catalog::Catalog;
use crate::config::{Channel, EnrichmentPolicy, Verification};
use crate::error::DiscoveryError;
use crate::model::{CompanyEstimate, Contact, EnrichmentEstimate};

/// Estimate under the default policy.
pub fn estimate(ids: &[String], catalog: &Catalog) -> Result<EnrichmentEstimate, DiscoveryError> {
    estimate_with(Lexicon::builtin(), &EnrichmentPolicy::default(), ids, catalog)
}

/// Credit cost of enriching `ids`. Reads enrichment state, never writes it.
/// Repeated ids count once, at their first position.
pub fn estimate_with(
    lexicon: &Lexicon,
    policy: &EnrichmentPolicy,
    ids: &[String],
    catalog: &Catalog,
) -> Result<EnrichmentEstimate, DiscoveryError> {
    let mut seen = HashSet::new();
    let mut out = EnrichmentEstimate::default();

    for id in ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let company = catalog
            .get(id)
            .ok_or_else(|| DiscoveryError::UnknownCompany(id.clone()))?;

        let billable = billable_contacts(lexicon, policy, &company.contacts);
        let contact_credits = billable as u64 * policy.contact_credit_rate;
        let profile_credits = if company.enrichment.enriched {
            0
        } else {
            policy.profile_credit_rate
        };

        out.contact_credits += contact_credits;
        out.profile_credits += profile_credits;
        out.breakdown.push(CompanyEstimate {
            company_id: company.id.clone(),
            billable_contacts: billable,
            contact_credits,
            profile_credits,
            total_credits: contact_credits + profile_credits,
        });
    }
    out.total_credits = out.contact_credits + out.profile_credits;

    log::debug!(
        "estimate: {} companies, {} credits",
        out.breakdown.len(),
        out.total_credits
    );
    Ok(out)
}

/// Contacts whose title maps to a policy role and that are reachable on a
/// policy channel under the verification mode, capped per company.
pub fn billable_contacts(lexicon: &Lexicon, policy: &EnrichmentPolicy, contacts: &[Contact]) -> usize {
    contacts
        .iter()
        .filter(|c| {
            lexicon
                .contact_role(&c.title)
                .is_some_and(|role| policy.roles.contains(&role))
        })
        .filter(|c| reachable(policy, c))
        .count()
        .min(policy.max_contacts_per_company)
}

fn reachable(policy: &EnrichmentPolicy, contact: &Contact) -> bool {
    policy.channels.iter().any(|channel| match channel {
        Channel::Email => {
            contact.email.as_deref().is_some_and(|e| !e.trim().is_empty())
                && (contact.email_verified || policy.verification == Verification::Relaxed)
        }
        Channel::LinkedIn => {
            policy.verification == Verification::Relaxed
                && contact
                    .linkedin_url
                    .as_deref()
                    .is_some_and(|u| !u.trim().is_empty())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::company;
    use buyerscope_lexicon::ContactRole;

    fn contact(title: &str, email: Option<&str>, verified: bool, linkedin: Option<&str>) -> Contact {
        Contact {
            title: title.into(),
            email: email.map(String::from),
            email_verified: verified,
            linkedin_url: linkedin.map(String::from),
        }
    }

    fn catalog() -> Catalog {
        let mut a = company("a", "A", &[]);
        a.contacts = vec![
            contact("Head of Procurement", Some("p@a.com"), true, None),
            contact("Category Manager", Some("cm@a.com"), true, None),
            contact("CEO", Some("ceo@a.com"), true, None),
        ];
        let mut b = company("b", "B", &[]);
        b.contacts = vec![
            contact("Senior Buyer", Some("buyer@b.com"), false, Some("https://linkedin.com/in/x")),
            contact("Marketing Intern", Some("i@b.com"), true, None),
        ];
        b.enrichment.enriched = true;
        let c = company("c", "C", &[]);
        Catalog::new(vec![a, b, c]).unwrap()
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strict_policy_counts_verified_role_contacts_capped() {
        let est = estimate(&ids(&["a", "b", "c"]), &catalog()).unwrap();
        let per: Vec<(&str, usize, u64, u64)> = est
            .breakdown
            .iter()
            .map(|e| (e.company_id.as_str(), e.billable_contacts, e.contact_credits, e.profile_credits))
            .collect();
        assert_eq!(per, vec![("a", 2, 2, 2), ("b", 0, 0, 0), ("c", 0, 0, 2)]);
        assert_eq!(est.contact_credits, 2);
        assert_eq!(est.profile_credits, 4);
        assert_eq!(est.total_credits, 6);
    }

    #[test]
    fn relaxed_policy_accepts_unverified_and_linkedin() {
        let policy = EnrichmentPolicy {
            verification: Verification::Relaxed,
            channels: vec![Channel::LinkedIn],
            ..EnrichmentPolicy::default()
        };
        let est = estimate_with(Lexicon::builtin(), &policy, &ids(&["b"]), &catalog()).unwrap();
        assert_eq!(est.breakdown[0].billable_contacts, 1);
        assert_eq!(est.total_credits, 1);
    }

    #[test]
    fn policy_roles_restrict_billing() {
        let policy = EnrichmentPolicy {
            roles: vec![ContactRole::Executive],
            contact_credit_rate: 3,
            ..EnrichmentPolicy::default()
        };
        let est = estimate_with(Lexicon::builtin(), &policy, &ids(&["a"]), &catalog()).unwrap();
        assert_eq!(est.breakdown[0].billable_contacts, 1);
        assert_eq!(est.contact_credits, 3);
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let est = estimate(&ids(&["c", "a", "c"]), &catalog()).unwrap();
        let order: Vec<&str> = est.breakdown.iter().map(|e| e.company_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a"]);
        assert_eq!(est.total_credits, 6);
    }

    #[test]
    fn unknown_id_fails() {
        let err = estimate(&ids(&["a", "zz"]), &catalog()).unwrap_err();
        assert_eq!(err, DiscoveryError::UnknownCompany("zz".into()));
    }

    #[test]
    fn empty_selection_costs_nothing() {
        assert_eq!(estimate(&[], &catalog()).unwrap(), EnrichmentEstimate::default());
    }

    #[test]
    fn estimate_does_not_touch_state() {
        let catalog = catalog();
        let before = catalog.clone();
        estimate(&ids(&["a", "b", "c"]), &catalog).unwrap();
        assert_eq!(catalog, before);
    }
}
