//! Accounts, uploads, scans and admin review around the similarity search.
//!
//! Every operation takes the acting user's id explicitly; there is no
//! ambient "current user".

pub mod account;
pub mod analytics;
pub mod credit;
pub mod store;

use indexmap::IndexMap;

use crate::{
    config::{Config, ServiceConfig},
    error::{DocMatchError, Result},
    service::{
        account::Account,
        analytics::{ScanRecord, UsageAnalytics},
        credit::{CreditRequest, Decision, RequestStatus},
        store::{Document, DocumentStore, MemoryStore},
    },
    vectorizer::{evaluate::scoring::Hits, DocumentSearcher},
};

/// Document scanning service
///
/// Owns the accounts, credit requests and scan log, and delegates ranking to
/// a `DocumentSearcher`. A scan only ever sees the caller's own documents.
pub struct ScanService<S = MemoryStore>
where
    S: DocumentStore,
{
    config: ServiceConfig,
    searcher: DocumentSearcher<String>,
    store: S,
    accounts: IndexMap<String, Account>,
    credit_requests: Vec<CreditRequest>,
    scan_records: Vec<ScanRecord>,
}

impl ScanService<MemoryStore> {
    pub fn in_memory(config: &Config) -> Self {
        Self::new(config, MemoryStore::new())
    }
}

impl<S> ScanService<S>
where
    S: DocumentStore,
{
    pub fn new(config: &Config, store: S) -> Self {
        Self {
            config: config.service.clone(),
            searcher: DocumentSearcher::new(config.search.clone()),
            store,
            accounts: IndexMap::new(),
            credit_requests: Vec::new(),
            scan_records: Vec::new(),
        }
    }

    pub fn searcher(&self) -> &DocumentSearcher<String> {
        &self.searcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn allowance(&self, is_admin: bool) -> u32 {
        if is_admin {
            self.config.admin_credits
        } else {
            self.config.default_credits
        }
    }

    fn account_mut(&mut self, user_id: &str) -> Result<&mut Account> {
        self.accounts
            .get_mut(user_id)
            .ok_or_else(|| DocMatchError::UnknownAccount(user_id.to_string()))
    }

    fn admin(&self, user_id: &str) -> Result<&Account> {
        let account = self.account(user_id)?;
        if !account.is_admin {
            return Err(DocMatchError::PermissionDenied(user_id.to_string()));
        }
        Ok(account)
    }
}

/// Accounts and credits
impl<S> ScanService<S>
where
    S: DocumentStore,
{
    /// Register a user with the configured starting credits
    pub fn open_account(&mut self, id: &str, name: &str, is_admin: bool) -> Result<&Account> {
        if self.accounts.contains_key(id) {
            return Err(DocMatchError::AccountExists(id.to_string()));
        }
        let account = Account::new(id, name, is_admin, self.allowance(is_admin));
        log::info!(
            "opened account {:?} (admin={}, credits={})",
            id,
            is_admin,
            account.credits_remaining
        );
        Ok(self.accounts.entry(id.to_string()).or_insert(account))
    }

    pub fn account(&self, user_id: &str) -> Result<&Account> {
        self.accounts
            .get(user_id)
            .ok_or_else(|| DocMatchError::UnknownAccount(user_id.to_string()))
    }

    /// Start of a new day: raise every balance to its daily allowance
    pub fn reset_daily_credits(&mut self) {
        let (regular, admin) = (self.config.default_credits, self.config.admin_credits);
        for account in self.accounts.values_mut() {
            account.top_up_to(if account.is_admin { admin } else { regular });
        }
        log::info!("daily credits reset for {} accounts", self.accounts.len());
    }

    /// Ask an admin for `amount` more credits; returns the request id
    pub fn request_credits(&mut self, user_id: &str, amount: u32) -> Result<String> {
        let request = CreditRequest::new(self.account(user_id)?, amount)?;
        let id = request.id.clone();
        log::info!("credit request {} by {:?} for {}", id, user_id, amount);
        self.credit_requests.push(request);
        Ok(id)
    }

    /// The user's own requests, oldest first
    pub fn credit_requests(&self, user_id: &str) -> Vec<&CreditRequest> {
        self.credit_requests
            .iter()
            .filter(|req| req.user_id == user_id)
            .collect()
    }
}

/// Documents and scans
impl<S> ScanService<S>
where
    S: DocumentStore,
{
    /// Store a plain-text upload; returns the new document id
    pub fn upload(&mut self, user_id: &str, name: &str, content: String) -> Result<String> {
        self.account(user_id)?;
        if !self.config.accepts_file_name(name) {
            return Err(DocMatchError::UnsupportedFileType(name.to_string()));
        }
        let doc = Document::new(user_id, name, content);
        let id = doc.id.clone();
        log::info!("{:?} uploaded {:?} as {} ({} bytes)", user_id, name, id, doc.content.len());
        self.store.insert(doc);
        Ok(id)
    }

    /// One of the user's own documents
    pub fn document(&self, user_id: &str, doc_id: &str) -> Result<&Document> {
        let doc = self
            .store
            .get(doc_id)
            .ok_or_else(|| DocMatchError::UnknownDocument(doc_id.to_string()))?;
        if doc.owner_id != user_id {
            return Err(DocMatchError::NotOwner {
                user_id: user_id.to_string(),
                doc_id: doc_id.to_string(),
            });
        }
        Ok(doc)
    }

    /// The user's documents in upload order
    pub fn documents(&self, user_id: &str) -> Vec<&Document> {
        self.store.by_owner(user_id)
    }

    /// Delete one of the user's own documents
    pub fn delete_document(&mut self, user_id: &str, doc_id: &str) -> Result<Document> {
        self.document(user_id, doc_id)?;
        let doc = self
            .store
            .remove(doc_id)
            .ok_or_else(|| DocMatchError::UnknownDocument(doc_id.to_string()))?;
        if let Some(cache) = self.searcher.cache() {
            cache.invalidate(&doc.id);
        }
        log::info!("{:?} deleted {}", user_id, doc_id);
        Ok(doc)
    }

    /// Rank the user's documents against `query`
    ///
    /// Costs one credit and is logged for analytics. Refused (without
    /// charging) when the query is blank or the user has no credits left.
    pub fn scan(&mut self, user_id: &str, query: &str) -> Result<Hits<Document>> {
        let account = self.account(user_id)?;
        if query.trim().is_empty() {
            log::warn!("scan by {:?} refused: empty query", user_id);
            return Err(DocMatchError::EmptyQuery);
        }
        if !account.has_credits() {
            log::warn!("scan by {:?} refused: no credits remaining", user_id);
            return Err(DocMatchError::InsufficientCredits {
                user_id: user_id.to_string(),
            });
        }
        let record = ScanRecord::new(account);

        let candidates = self.store.by_owner(user_id);
        let hits = self
            .searcher
            .search(query, &candidates)
            .map_keys(|doc| (*doc).clone());

        self.scan_records.push(record);
        let account = self.account_mut(user_id)?;
        account.reduce_credits();
        log::info!(
            "{:?} scanned {} documents, {} credits left",
            user_id,
            hits.len(),
            account.credits_remaining
        );
        Ok(hits)
    }
}

/// Admin operations
impl<S> ScanService<S>
where
    S: DocumentStore,
{
    /// Approve or reject a pending credit request.
    /// Approval adds the requested credits to the requester's balance.
    pub fn review_credit_request(
        &mut self,
        admin_id: &str,
        request_id: &str,
        decision: Decision,
    ) -> Result<RequestStatus> {
        self.admin(admin_id)?;
        let request = self
            .credit_requests
            .iter_mut()
            .find(|req| req.id == request_id)
            .ok_or_else(|| DocMatchError::UnknownCreditRequest(request_id.to_string()))?;
        let status = request.resolve(decision)?;
        let (user_id, credits) = (request.user_id.clone(), request.requested_credits);

        if status == RequestStatus::Approved {
            self.account_mut(&user_id)?.add_credits(credits);
        }
        log::info!(
            "{:?} {} credit request {} ({} credits for {:?})",
            admin_id,
            status,
            request_id,
            credits,
            user_id
        );
        Ok(status)
    }

    /// Every credit request, oldest first
    pub fn all_credit_requests(&self, admin_id: &str) -> Result<&[CreditRequest]> {
        self.admin(admin_id)?;
        Ok(&self.credit_requests)
    }

    pub fn scan_records(&self, admin_id: &str) -> Result<&[ScanRecord]> {
        self.admin(admin_id)?;
        Ok(&self.scan_records)
    }

    pub fn analytics(&self, admin_id: &str) -> Result<UsageAnalytics> {
        self.admin(admin_id)?;
        Ok(UsageAnalytics::compute(
            &self.scan_records,
            &self.credit_requests,
            self.config.top_users_limit,
        ))
    }
}
