//! Mock job board and dream-job matching.

use crate::state::{DreamJob, JobArea, WorkModel};

pub struct JobOffer {
    pub id: u32,
    pub title: &'static str,
    pub company: &'static str,
    pub city: &'static str,
    pub area: JobArea,
    pub work_model: WorkModel,
    /// Monthly.
    pub salary: u32,
}

pub static JOB_BOARD: [JobOffer; 6] = [
    JobOffer {
        id: 101,
        title: "Frontend developer",
        company: "Lumen Pay",
        city: "Lisbon",
        area: JobArea::Engineering,
        work_model: WorkModel::Hybrid,
        salary: 3_200,
    },
    JobOffer {
        id: 102,
        title: "Product designer",
        company: "Casa Verde",
        city: "Porto",
        area: JobArea::Design,
        work_model: WorkModel::Remote,
        salary: 2_700,
    },
    JobOffer {
        id: 103,
        title: "Data analyst",
        company: "Northwind Retail",
        city: "Braga",
        area: JobArea::Data,
        work_model: WorkModel::OnSite,
        salary: 2_400,
    },
    JobOffer {
        id: 104,
        title: "Backend engineer",
        company: "Orbita Cloud",
        city: "Remote",
        area: JobArea::Engineering,
        work_model: WorkModel::Remote,
        salary: 4_100,
    },
    JobOffer {
        id: 105,
        title: "Growth marketer",
        company: "Feira Digital",
        city: "Lisbon",
        area: JobArea::Marketing,
        work_model: WorkModel::Hybrid,
        salary: 2_300,
    },
    JobOffer {
        id: 106,
        title: "Operations coordinator",
        company: "Rota Logistics",
        city: "Coimbra",
        area: JobArea::Operations,
        work_model: WorkModel::OnSite,
        salary: 1_900,
    },
];

/// 0-100. Area counts most, then work model, then pay.
pub fn match_score(job: &JobOffer, dream: Option<&DreamJob>) -> u8 {
    let Some(dream) = dream else {
        return 0;
    };
    let mut score = 0;
    if job.area == dream.area {
        score += 50;
    }
    if job.work_model == dream.work_model {
        score += 30;
    }
    if job.salary >= dream.salary_floor {
        score += 20;
    }
    score
}

/// Board sorted by match, best first; ties keep board order.
pub fn ranked(dream: Option<&DreamJob>) -> Vec<(&'static JobOffer, u8)> {
    let mut jobs: Vec<(&'static JobOffer, u8)> = JOB_BOARD
        .iter()
        .map(|job| (job, match_score(job, dream)))
        .collect();
    jobs.sort_by(|a, b| b.1.cmp(&a.1));
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Seniority;

    fn dream(area: JobArea, work_model: WorkModel, salary_floor: u32) -> DreamJob {
        DreamJob {
            area,
            seniority: Seniority::Mid,
            work_model,
            salary_floor,
        }
    }

    #[test]
    fn no_dream_job_scores_zero_and_keeps_order() {
        let jobs = ranked(None);
        assert!(jobs.iter().all(|(_, score)| *score == 0));
        let ids: Vec<u32> = jobs.iter().map(|(job, _)| job.id).collect();
        assert_eq!(ids, vec![101, 102, 103, 104, 105, 106]);
    }

    #[test]
    fn full_match_scores_hundred() {
        let d = dream(JobArea::Engineering, WorkModel::Remote, 4_000);
        assert_eq!(match_score(&JOB_BOARD[3], Some(&d)), 100);
        // Same area, wrong model, pay too low.
        assert_eq!(match_score(&JOB_BOARD[0], Some(&d)), 50);
    }

    #[test]
    fn ranking_puts_best_first() {
        let d = dream(JobArea::Design, WorkModel::Remote, 2_000);
        let jobs = ranked(Some(&d));
        assert_eq!(jobs[0].0.id, 102);
        assert_eq!(jobs[0].1, 100);
        // Remote engineering pays enough: 30 + 20.
        assert_eq!(jobs[1].0.id, 104);
    }
}
