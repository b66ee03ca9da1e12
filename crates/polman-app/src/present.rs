//! Domain objects -> render models.

use polman_domain::{Policy, PolicyScan};
use polman_render::{
    RenderableListEntry, RenderablePolicy, RenderableRecommendation, RenderableScan,
    RenderableVersion,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub(crate) fn timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

pub(crate) fn policy(policy: &Policy) -> RenderablePolicy {
    RenderablePolicy {
        policy_id: policy.policy_id().to_string(),
        title: policy.title().to_string(),
        library: policy.library().to_string(),
        owner: policy.owner().map(str::to_string),
        status: policy.status().map(str::to_string),
        content: policy.content().to_string(),
        last_reviewed_at: policy.last_reviewed_at().map(timestamp),
        versions: policy
            .versions()
            .iter()
            .enumerate()
            .map(|(idx, v)| RenderableVersion {
                number: idx + 1,
                content: v.content.clone(),
                change: v.change.clone(),
                recorded_at: timestamp(v.recorded_at),
                actor: v.actor.clone(),
            })
            .collect(),
    }
}

pub(crate) fn list_entry(policy: &Policy) -> RenderableListEntry {
    RenderableListEntry {
        policy_id: policy.policy_id().to_string(),
        title: policy.title().to_string(),
        library: policy.library().to_string(),
    }
}

pub(crate) fn scan(scan: &PolicyScan) -> RenderableScan {
    RenderableScan {
        policy_id: scan.policy_id.clone(),
        last_updated: timestamp(scan.last_updated),
        recommendations: scan
            .recommendations
            .iter()
            .map(|r| RenderableRecommendation {
                code: r.code().to_string(),
                message: r.to_string(),
            })
            .collect(),
    }
}
