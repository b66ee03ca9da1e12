//! Staleness and metadata recommendations for stored policies.

use crate::policy::Policy;
use polman_types::ids::{CODE_MISSING_ACTOR, CODE_STALE_POLICY};
use std::fmt;
use time::{Duration, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recommendation {
    /// Last mutation is older than the staleness threshold.
    Stale { days: u32 },
    /// The latest version has no actor.
    MissingActor,
}

impl Recommendation {
    pub fn code(&self) -> &'static str {
        match self {
            Recommendation::Stale { .. } => CODE_STALE_POLICY,
            Recommendation::MissingActor => CODE_MISSING_ACTOR,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Stale { days } => {
                write!(f, "Review policy; last updated over {days} days ago.")
            }
            Recommendation::MissingActor => {
                f.write_str("Capture updated_by metadata on next revision.")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyScan {
    pub policy_id: String,
    pub last_updated: OffsetDateTime,
    pub recommendations: Vec<Recommendation>,
}

impl PolicyScan {
    pub fn is_clean(&self) -> bool {
        self.recommendations.is_empty()
    }
}

pub(crate) fn scan_policy(policy: &Policy, staleness_days: u32, now: OffsetDateTime) -> PolicyScan {
    let latest = policy.latest_version();
    let mut recommendations = Vec::new();

    if now - latest.recorded_at > Duration::days(i64::from(staleness_days)) {
        recommendations.push(Recommendation::Stale {
            days: staleness_days,
        });
    }
    if latest.actor.is_none() {
        recommendations.push(Recommendation::MissingActor);
    }

    PolicyScan {
        policy_id: policy.policy_id().to_string(),
        last_updated: latest.recorded_at,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Attribution, NewPolicy};
    use crate::test_support::T0;

    fn policy_by(actor: Option<&str>) -> Policy {
        let attribution = Attribution {
            actor: actor.map(str::to_string),
            at: Some(T0),
        };
        Policy::create(NewPolicy::new("1", "First", "v1").attributed(attribution))
    }

    #[test]
    fn fresh_attributed_policy_is_clean() {
        let scan = scan_policy(&policy_by(Some("alice")), 30, T0 + Duration::days(30));
        assert!(scan.is_clean());
        assert_eq!(scan.last_updated, T0);
    }

    #[test]
    fn threshold_is_exclusive() {
        let policy = policy_by(Some("alice"));
        let at_limit = scan_policy(&policy, 30, T0 + Duration::days(30));
        assert!(at_limit.is_clean());

        let past_limit = scan_policy(&policy, 30, T0 + Duration::days(30) + Duration::seconds(1));
        assert_eq!(
            past_limit.recommendations,
            vec![Recommendation::Stale { days: 30 }]
        );
    }

    #[test]
    fn stale_and_anonymous_yields_both_messages() {
        let scan = scan_policy(&policy_by(None), 90, T0 + Duration::days(365));
        let messages: Vec<String> = scan.recommendations.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Review policy; last updated over 90 days ago.".to_string(),
                "Capture updated_by metadata on next revision.".to_string(),
            ]
        );
        assert_eq!(scan.recommendations[1].code(), "missing_actor");
    }
}
