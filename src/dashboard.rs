use serde::Serialize;

use crate::guard::{nav_links, NavLink};
use crate::session::{Role, Session};
use crate::students::{ResultCategory, StudentRecord};
use crate::trend::{self, ChartData, PerformanceSummary, ScorePoint};

#[derive(Debug, Serialize, Clone)]
pub struct NamedCount {
    pub name: &'static str,
    pub value: u32,
}

fn counts(pairs: &[(&'static str, u32)]) -> Vec<NamedCount> {
    pairs
        .iter()
        .map(|&(name, value)| NamedCount { name, value })
        .collect()
}

#[derive(Debug, Serialize, Clone)]
pub struct StudentProfile {
    pub id: String,
    pub module: &'static str,
    pub presentation: &'static str,
    pub region: String,
    pub education: String,
    pub final_result: ResultCategory,
}

#[derive(Debug, Serialize, Clone)]
pub struct StudentDashboard {
    pub profile: StudentProfile,
    pub scores: Vec<ScorePoint>,
    pub chart: ChartData,
    pub performance: PerformanceSummary,
    pub vle_activity: Vec<NamedCount>,
    pub credits: Vec<NamedCount>,
    pub nav: &'static [NavLink],
}

/// Builds the student's own page. When the session id matches a roster
/// entry its region, education and result are shown.
pub fn student_dashboard(
    session: &Session,
    roster: &[StudentRecord],
    scores: Vec<ScorePoint>,
) -> StudentDashboard {
    let record = roster.iter().find(|r| r.id == session.id);
    let performance = trend::estimate(&scores);

    let profile = StudentProfile {
        id: session.id.clone(),
        module: "AAA",
        presentation: "2013J",
        region: record
            .map(|r| r.region.clone())
            .unwrap_or_else(|| "East Anglian Region".to_string()),
        education: record
            .map(|r| r.education.clone())
            .unwrap_or_else(|| "HE Qualification".to_string()),
        final_result: record
            .map(|r| r.result)
            .unwrap_or_else(|| ResultCategory::from_score(performance.mean)),
    };

    StudentDashboard {
        profile,
        chart: trend::chart_data(&scores),
        scores,
        performance,
        vle_activity: counts(&[
            ("Forum", 94),
            ("Resource", 127),
            ("Quiz", 43),
            ("URL", 65),
            ("Wiki", 31),
        ]),
        credits: counts(&[("Completed", 180), ("In Progress", 60), ("Planned", 120)]),
        nav: nav_links(session.role),
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Overview {
    pub total_students: usize,
    pub pass_rate: u32,
    pub average_score: u32,
    pub completion_rate: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ResultShare {
    pub result: ResultCategory,
    pub count: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct ModulePerformance {
    pub module: &'static str,
    pub pass: u32,
    pub fail: u32,
}

#[derive(Debug, Serialize, Clone)]
pub struct WeeklyActivity {
    pub week: String,
    pub clicks: u32,
}

#[derive(Debug, Serialize, Clone)]
pub struct Notice {
    pub kind: &'static str,
    pub message: String,
    pub time: &'static str,
}

#[derive(Debug, Serialize, Clone)]
pub struct AdminDashboard {
    pub overview: Overview,
    pub results: Vec<ResultShare>,
    pub modules: Vec<ModulePerformance>,
    pub activity: Vec<WeeklyActivity>,
    pub notices: Vec<Notice>,
    pub nav: &'static [NavLink],
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        (part as f64 * 100.0 / whole as f64).round() as u32
    }
}

pub fn overview(roster: &[StudentRecord]) -> Overview {
    let total = roster.len();
    let passing = roster.iter().filter(|r| r.result.is_passing()).count();
    let completed = roster
        .iter()
        .filter(|r| r.result != ResultCategory::Withdrawn)
        .count();
    let score_sum: usize = roster.iter().map(|r| r.score as usize).sum();

    Overview {
        total_students: total,
        pass_rate: percent(passing, total),
        average_score: if total == 0 {
            0
        } else {
            (score_sum as f64 / total as f64).round() as u32
        },
        completion_rate: percent(completed, total),
    }
}

/// Result counts in display order: Distinction, Pass, Fail, Withdrawn.
pub fn result_distribution(roster: &[StudentRecord]) -> Vec<ResultShare> {
    ResultCategory::ALL
        .iter()
        .map(|&result| ResultShare {
            result,
            count: roster.iter().filter(|r| r.result == result).count(),
        })
        .collect()
}

pub fn admin_dashboard(roster: &[StudentRecord]) -> AdminDashboard {
    let at_risk = roster
        .iter()
        .filter(|r| r.result == ResultCategory::Fail)
        .count();

    let modules = [("AAA", 85), ("BBB", 78), ("CCC", 65), ("DDD", 72), ("EEE", 70)]
        .iter()
        .map(|&(module, pass)| ModulePerformance {
            module,
            pass,
            fail: 100 - pass,
        })
        .collect();

    let activity = [12500, 14200, 15800, 13900, 12300, 16500, 17200, 15100]
        .iter()
        .enumerate()
        .map(|(i, &clicks)| WeeklyActivity {
            week: format!("Week {}", i + 1),
            clicks,
        })
        .collect();

    AdminDashboard {
        overview: overview(roster),
        results: result_distribution(roster),
        modules,
        activity,
        notices: vec![
            Notice {
                kind: "warning",
                message: format!("{} students at risk of failing", at_risk),
                time: "2 hours ago",
            },
            Notice {
                kind: "info",
                message: "Module AAA assessments graded".to_string(),
                time: "1 day ago",
            },
            Notice {
                kind: "success",
                message: "27 students improved their scores".to_string(),
                time: "3 days ago",
            },
        ],
        nav: nav_links(Role::Admin),
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Document,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub title: &'static str,
    pub message: &'static str,
    pub timestamp: &'static str,
    pub read: bool,
    pub kind: NotificationKind,
    pub link: Option<&'static str>,
}

pub struct NotificationPanel {
    notifications: Vec<Notification>,
}

impl NotificationPanel {
    pub fn new() -> Self {
        let notifications = vec![
            Notification {
                id: "1".to_string(),
                title: "Performance feedback",
                message: "Your instructor has provided feedback on your recent assessment.",
                timestamp: "1 hour ago",
                read: false,
                kind: NotificationKind::Info,
                link: Some("/feedback/1"),
            },
            Notification {
                id: "2".to_string(),
                title: "Study recommendation",
                message: "Based on your recent activity, we recommend reviewing module 3 materials.",
                timestamp: "3 hours ago",
                read: false,
                kind: NotificationKind::Document,
                link: Some("/resources/module3"),
            },
            Notification {
                id: "3".to_string(),
                title: "Warning: Low engagement",
                message: "Your activity level has decreased. Consider increasing your participation.",
                timestamp: "2 days ago",
                read: true,
                kind: NotificationKind::Warning,
                link: None,
            },
        ];
        Self { notifications }
    }

    pub fn list(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Marks one notification read. Returns `None` for an unknown id,
    /// otherwise the link to follow (if it has one).
    pub fn mark_read(&mut self, id: &str) -> Option<Option<&'static str>> {
        let notification = self.notifications.iter_mut().find(|n| n.id == id)?;
        notification.read = true;
        Some(notification.link)
    }
}

impl Default for NotificationPanel {
    fn default() -> Self {
        Self::new()
    }
}
