//! Admin report queue: one filtered page of reports plus status triage.

use std::sync::Arc;

use crate::config::GrewConfig;
use crate::error::ViewError;
use crate::gateway::{ReportFilter, ReportGateway};
use crate::types::{Report, ReportStatus};

pub struct ReportQueue {
    gateway: Arc<dyn ReportGateway>,
    page_size: u32,
    filter: ReportFilter,
    current_page: u32,
    reports: Vec<Report>,
}

impl ReportQueue {
    pub fn new(gateway: Arc<dyn ReportGateway>, config: &GrewConfig) -> Self {
        Self {
            gateway,
            page_size: config.report_page_size.max(1),
            filter: ReportFilter::all(),
            current_page: 1,
            reports: Vec::new(),
        }
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn filter(&self) -> &ReportFilter {
        &self.filter
    }

    /// Load a 1-based page under `filter`. On failure the previous page stays
    /// in place.
    pub async fn load(&mut self, filter: ReportFilter, page: u32) -> Result<&[Report], ViewError> {
        let page = page.max(1);
        let envelope = self
            .gateway
            .list_reports(&filter, page - 1, self.page_size)
            .await
            .map_err(|e| {
                log::warn!("Report page {} failed: {}", page, e);
                ViewError::ReportFetch(e.to_string())
            })?;

        self.reports = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Report::from)
            .collect();
        self.filter = filter;
        self.current_page = page;
        log::debug!("Loaded {} reports (page {})", self.reports.len(), page);
        Ok(&self.reports)
    }

    /// Change a report's status. The local copy is updated only once the
    /// backend acknowledges the change.
    pub async fn set_status(&mut self, report_no: i64, status: ReportStatus) -> Result<(), ViewError> {
        let ack = self
            .gateway
            .set_report_status(report_no, status)
            .await
            .map_err(|e| {
                log::warn!("Report {} status update failed: {}", report_no, e);
                ViewError::ReportUpdate(e.to_string())
            })?;

        if !ack.success {
            let message = ack.message.unwrap_or_default();
            log::warn!("Report {} status update rejected: {}", report_no, message);
            return Err(ViewError::Rejected(message));
        }

        log::info!("Report {} -> {}", report_no, status.as_str());
        if let Some(report) = self.reports.iter_mut().find(|r| r.report_no == report_no) {
            report.status = Some(status);
        }
        Ok(())
    }
}
