//! Results view state: the decoded skill list, the chart ranking and the
//! selected-skill detail. Owned by whoever renders it; nothing is global.

use serde::Serialize;
use tracing::error;

use crate::results::decoder::{decode_skills_param, DecodedSkills};
use crate::results::navigation::UPLOAD_PATH;
use crate::skills::models::Skill;

/// Number of bars in the proficiency chart.
pub const CHART_LIMIT: usize = 10;

/// Top skills by level, descending. Stable: equal levels keep list order.
pub fn rank_for_chart(skills: &[Skill]) -> Vec<Skill> {
    let mut ranked = skills.to_vec();
    ranked.sort_by(|a, b| b.level.total_cmp(&a.level));
    ranked.truncate(CHART_LIMIT);
    ranked
}

/// What the results route shows for a given `skills` parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsPage {
    /// The payload was unusable; send the user back to upload.
    Redirect { location: &'static str },
    /// Nothing to show: render the "no skills" state.
    Empty,
    Skills(ResultsView),
}

impl ResultsPage {
    /// Runs the decoder and collapses every malformed payload into a redirect.
    pub fn load(raw_skills_param: Option<&str>) -> Self {
        match decode_skills_param(raw_skills_param) {
            Ok(DecodedSkills::Empty) => ResultsPage::Empty,
            Ok(DecodedSkills::Skills(skills)) => ResultsPage::Skills(ResultsView::new(skills)),
            Err(e) => {
                error!("Failed to decode skills parameter, redirecting to upload: {e}");
                ResultsPage::Redirect {
                    location: UPLOAD_PATH,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    skills: Vec<Skill>,
    /// A copy, so replacing `skills` can never leave it dangling.
    selected: Option<Skill>,
}

impl ResultsView {
    pub fn new(skills: Vec<Skill>) -> Self {
        Self {
            skills,
            selected: None,
        }
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn ranked(&self) -> Vec<Skill> {
        rank_for_chart(&self.skills)
    }

    /// Selects the skill at `index` for the detail panel.
    pub fn select(&mut self, index: usize) -> Option<&Skill> {
        self.selected = self.skills.get(index).cloned();
        self.selected.as_ref()
    }

    /// Selects the first skill whose name matches, ignoring case.
    pub fn select_by_name(&mut self, name: &str) -> Option<&Skill> {
        let index = self
            .skills
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name.trim()))?;
        self.select(index)
    }

    pub fn selected(&self) -> Option<&Skill> {
        self.selected.as_ref()
    }
}
