//! Pulse page panels
//!
//! - Tags summary: one statistic
//! - Tags leaderboard: ranked contributors in upstream order
//! - Financial report: total raised and one backer card per donor

use serde::Serialize;

use super::links;
use crate::model::{FinancialReport, TagsLeaderboard};

/// Ranks that get the highlight treatment
///
/// Positional only: tied totals around the cut-off are not considered.
pub const HIGHLIGHTED_RANKS: usize = 3;

/// Shown in place of a missing username
pub const UNKNOWN_USER: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsSummaryView {
    pub total_media_with_tags: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRowView {
    /// 1-based position in the upstream ranking
    pub rank: usize,
    pub highlighted: bool,
    pub user_uuid: String,
    pub display_name: String,
    pub profile_href: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackerCard {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReportView {
    /// Amount formatted the way it is written in copy ("1000", "1250.5")
    pub total_raised: String,
    pub backers: Vec<BackerCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseView {
    pub summary: TagsSummaryView,
    pub leaderboard: Vec<LeaderboardRowView>,
    pub financial: FinancialReportView,
}

pub fn present_summary(leaderboard: &TagsLeaderboard) -> TagsSummaryView {
    TagsSummaryView {
        total_media_with_tags: leaderboard.all_time.total_media_with_tags,
    }
}

pub fn present_leaderboard(leaderboard: &TagsLeaderboard) -> Vec<LeaderboardRowView> {
    leaderboard
        .all_time
        .by_users
        .iter()
        .enumerate()
        .map(|(index, entry)| LeaderboardRowView {
            rank: index + 1,
            highlighted: index < HIGHLIGHTED_RANKS,
            user_uuid: entry.user_uuid.clone(),
            display_name: entry
                .username
                .clone()
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
            profile_href: entry.username.as_deref().map(links::profile_path),
            total: entry.total,
        })
        .collect()
}

pub fn present_financial_report(report: &FinancialReport) -> FinancialReportView {
    FinancialReportView {
        total_raised: format_amount(report.total_raised),
        backers: report
            .donors
            .iter()
            .map(|donor| BackerCard {
                id: donor.account.id.clone(),
                name: donor.account.name.clone(),
                image_url: donor.account.image_url.clone(),
            })
            .collect(),
    }
}

pub fn present_pulse(report: &FinancialReport, leaderboard: &TagsLeaderboard) -> PulseView {
    PulseView {
        summary: present_summary(leaderboard),
        leaderboard: present_leaderboard(leaderboard),
        financial: present_financial_report(report),
    }
}

/// Shortest decimal form, no trailing ".0" for whole amounts
fn format_amount(amount: f64) -> String {
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, AllTimeTags, Donor, TagsByUser};

    fn user(uuid: &str, username: Option<&str>, total: u64) -> TagsByUser {
        TagsByUser {
            user_uuid: uuid.to_string(),
            username: username.map(str::to_string),
            total,
        }
    }

    fn board(users: Vec<TagsByUser>) -> TagsLeaderboard {
        TagsLeaderboard {
            all_time: AllTimeTags {
                total_media_with_tags: 9,
                by_users: users,
            },
        }
    }

    #[test]
    fn test_top_three_highlighted() {
        let rows = present_leaderboard(&board(vec![
            user("1", Some("a"), 5),
            user("2", Some("b"), 3),
            user("3", Some("c"), 1),
            user("4", Some("d"), 0),
        ]));

        let highlighted: Vec<_> = rows.iter().map(|r| (r.display_name.as_str(), r.rank, r.highlighted)).collect();
        assert_eq!(
            highlighted,
            vec![("a", 1, true), ("b", 2, true), ("c", 3, true), ("d", 4, false)]
        );
        assert_eq!(rows[0].profile_href.as_deref(), Some("/u/a"));
    }

    #[test]
    fn test_ties_are_not_considered() {
        let rows = present_leaderboard(&board(vec![
            user("1", Some("a"), 4),
            user("2", Some("b"), 4),
            user("3", Some("c"), 4),
            user("4", Some("d"), 4),
        ]));

        assert!(rows[2].highlighted);
        assert!(!rows[3].highlighted);
    }

    #[test]
    fn test_missing_username() {
        let rows = present_leaderboard(&board(vec![user("1", None, 7)]));

        assert_eq!(rows[0].display_name, "unknown");
        assert!(rows[0].profile_href.is_none());
        assert_eq!(rows[0].total, 7);
    }

    #[test]
    fn test_financial_report() {
        let view = present_financial_report(&FinancialReport {
            total_raised: 1000.0,
            donors: vec![Donor {
                account: Account {
                    id: "1".to_string(),
                    name: "X".to_string(),
                    image_url: Some("u".to_string()),
                },
            }],
        });

        assert_eq!(view.total_raised, "1000");
        assert_eq!(view.backers.len(), 1);
        assert_eq!(view.backers[0].name, "X");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(1250.5), "1250.5");
    }

    #[test]
    fn test_summary() {
        let view = present_pulse(
            &FinancialReport {
                total_raised: 0.0,
                donors: vec![],
            },
            &board(vec![]),
        );

        assert_eq!(view.summary.total_media_with_tags, 9);
        assert!(view.leaderboard.is_empty());
        assert!(view.financial.backers.is_empty());
    }
}
