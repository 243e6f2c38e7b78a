use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::students::ResultCategory;

/// The inputs collected by the prediction form. No model consumes them
/// yet; they are recorded with each request.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PredictionForm {
    pub assessment_score: Option<f64>,
    pub clicks: Option<u32>,
    pub gender: Option<String>,
    pub education: Option<String>,
    pub age_band: Option<String>,
    pub previous_attempts: Option<String>,
    pub disability_status: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Prediction {
    pub result: ResultCategory,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

fn canned(result: ResultCategory, confidence: f64, recommendations: &[&str]) -> Prediction {
    Prediction {
        result,
        confidence,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn canned_predictions() -> Vec<Prediction> {
    vec![
        canned(
            ResultCategory::Pass,
            0.78,
            &[
                "Continue with current study patterns",
                "Participate more in discussion forums",
                "Review module 3 materials before the final assessment",
            ],
        ),
        canned(
            ResultCategory::Fail,
            0.65,
            &[
                "Increase study time by at least 5 hours per week",
                "Seek tutoring for difficult topics",
                "Schedule regular meetings with your advisor",
                "Complete all practice exercises in modules 1-4",
            ],
        ),
        canned(
            ResultCategory::Withdrawn,
            0.82,
            &[
                "Contact student support services immediately",
                "Consider switching to part-time enrollment",
                "Schedule a meeting with your academic advisor",
                "Apply for academic accommodations if eligible",
            ],
        ),
        canned(
            ResultCategory::Distinction,
            0.91,
            &[
                "Consider mentoring other students",
                "Apply for advanced studies opportunities",
                "Explore research projects with faculty members",
            ],
        ),
    ]
}

/// Picks one of the canned outcomes uniformly at random.
pub struct Predictor {
    outcomes: Vec<Prediction>,
    rng: StdRng,
}

impl Predictor {
    pub fn new(seed: u64) -> Self {
        Self {
            outcomes: canned_predictions(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn predict(&mut self, form: &PredictionForm) -> Prediction {
        log::debug!("prediction requested with {:?}", form);
        let index = self.rng.gen_range(0..self.outcomes.len());
        self.outcomes[index].clone()
    }
}
