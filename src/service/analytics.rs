use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::{account::Account, credit::CreditRequest};

/// One successful scan, kept for usage analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(account: &Account) -> Self {
        Self::at(account, Utc::now())
    }

    pub fn at(account: &Account, timestamp: DateTime<Utc>) -> Self {
        ScanRecord {
            id: Uuid::new_v4().to_string(),
            user_id: account.id.clone(),
            user_name: account.name.clone(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScans {
    /// UTC calendar day
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScans {
    pub user_id: String,
    pub name: String,
    pub scans: usize,
}

/// Admin dashboard numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAnalytics {
    pub total_scans: usize,
    pub pending_requests: usize,
    /// oldest day first
    pub daily_scans: Vec<DailyScans>,
    /// most scans first; ties in order of each user's first scan
    pub top_users: Vec<UserScans>,
}

impl UsageAnalytics {
    pub fn compute(
        records: &[ScanRecord],
        requests: &[CreditRequest],
        top_users_limit: usize,
    ) -> Self {
        let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut by_user: IndexMap<&str, UserScans> = IndexMap::new();

        for record in records {
            *by_day.entry(record.timestamp.date_naive()).or_insert(0) += 1;
            by_user
                .entry(record.user_id.as_str())
                .or_insert_with(|| UserScans {
                    user_id: record.user_id.clone(),
                    name: record.user_name.clone(),
                    scans: 0,
                })
                .scans += 1;
        }

        let mut top_users: Vec<UserScans> = by_user.into_values().collect();
        top_users.sort_by(|a, b| b.scans.cmp(&a.scans));
        top_users.truncate(top_users_limit);

        UsageAnalytics {
            total_scans: records.len(),
            pending_requests: requests.iter().filter(|req| req.is_pending()).count(),
            daily_scans: by_day
                .into_iter()
                .map(|(date, count)| DailyScans { date, count })
                .collect(),
            top_users,
        }
    }
}
