//! Mock hiring insights for the company dashboard.
//!
//! Numbers are derived from the posting so the same posting always shows the
//! same dashboard.

use crate::state::{JobPosting, WorkModel};

pub const WEEK_LABELS: [&str; 6] = ["W1", "W2", "W3", "W4", "W5", "W6"];

const WEEKLY_SHAPE: [u64; 6] = [4, 7, 11, 9, 14, 18];

pub const FUNNEL_STAGES: [&str; 4] = ["Applied", "Screened", "Interviewed", "Offer"];

pub struct CandidateMatch {
    pub name: &'static str,
    pub headline: &'static str,
    pub score: u8,
}

struct Pool {
    name: &'static str,
    headline: &'static str,
    base: u8,
    prefers: WorkModel,
}

const POOL: [Pool; 5] = [
    Pool {
        name: "Marta Reis",
        headline: "5 yrs · product analytics",
        base: 78,
        prefers: WorkModel::Hybrid,
    },
    Pool {
        name: "João Pires",
        headline: "3 yrs · full-stack",
        base: 72,
        prefers: WorkModel::Remote,
    },
    Pool {
        name: "Inês Costa",
        headline: "7 yrs · team lead",
        base: 69,
        prefers: WorkModel::OnSite,
    },
    Pool {
        name: "Rui Almeida",
        headline: "2 yrs · career switcher",
        base: 61,
        prefers: WorkModel::Remote,
    },
    Pool {
        name: "Beatriz Lopes",
        headline: "4 yrs · operations",
        base: 57,
        prefers: WorkModel::Hybrid,
    },
];

pub struct Insights {
    pub weekly_applicants: [u64; 6],
    /// Counts per [`FUNNEL_STAGES`] entry, never increasing.
    pub funnel: [u64; 4],
    pub candidates: Vec<CandidateMatch>,
}

impl Insights {
    pub fn total_applicants(&self) -> u64 {
        self.weekly_applicants.iter().sum()
    }
}

pub fn insights(posting: Option<&JobPosting>) -> Insights {
    let Some(posting) = posting else {
        return Insights {
            weekly_applicants: [0; 6],
            funnel: [0; 4],
            candidates: rank(None),
        };
    };

    let seed = posting
        .title
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    let bump = seed % 5;
    let weekly_applicants = WEEKLY_SHAPE.map(|n| n + bump);

    let applied: u64 = weekly_applicants.iter().sum();
    let screened = applied * 60 / 100;
    let interviewed = applied * 25 / 100;
    let offers = (applied * 6 / 100).max(1).min(interviewed);

    Insights {
        weekly_applicants,
        funnel: [applied, screened, interviewed, offers],
        candidates: rank(Some(posting.work_model)),
    }
}

fn rank(model: Option<WorkModel>) -> Vec<CandidateMatch> {
    let mut candidates: Vec<CandidateMatch> = POOL
        .iter()
        .map(|p| {
            let bonus = if Some(p.prefers) == model { 15 } else { 0 };
            CandidateMatch {
                name: p.name,
                headline: p.headline,
                score: (p.base + bonus).min(100),
            }
        })
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}
