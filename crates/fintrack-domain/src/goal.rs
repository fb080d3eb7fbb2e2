//! Domain model for savings goals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, RecordId};

/// A savings goal with a target amount and optional deadline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl Goal {
    /// Percent of the target saved so far; 0 when the target is 0.
    pub fn progress_percent(&self) -> f64 {
        if self.target > 0.0 {
            self.current / self.target * 100.0
        } else {
            0.0
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.target - self.current).max(0.0)
    }
}

impl Identifiable for Goal {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field set for a new goal before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target: f64,
    pub current: f64,
    pub deadline: Option<NaiveDate>,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target: f64) -> Self {
        Self {
            name: name.into(),
            target,
            current: 0.0,
            deadline: None,
        }
    }

    pub fn with_current(mut self, current: f64) -> Self {
        self.current = current;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn into_goal(self, id: RecordId) -> Goal {
        Goal {
            id,
            name: self.name,
            target: self.target,
            current: self.current,
            deadline: self.deadline,
        }
    }
}

/// Shallow changeset for [`Goal`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl GoalPatch {
    pub fn apply(self, goal: &mut Goal) {
        if let Some(name) = self.name {
            goal.name = name;
        }
        if let Some(target) = self.target {
            goal.target = target;
        }
        if let Some(current) = self.current {
            goal.current = current;
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = Some(deadline);
        }
    }
}
