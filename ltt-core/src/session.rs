//! Per-user session: which actions are available and the current report.
//!
//! ```text
//! Idle --submit--> Calculated --export--> Exported
//!  ^                   |                     |
//!  +------reset--------+---------reset-------+
//! ```
//!
//! The state only gates actions; it never feeds into the arithmetic.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::calculations::{CalculationError, LandTransferTaxCalculator};
use crate::models::{LegalFeeEstimate, PurchaseInput, SummaryReport};
use crate::render::{DocumentArtifact, DocumentRenderer, RenderError};
use crate::summary::SummaryAssembler;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The form holds input the calculator rejects.
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// Export was requested before a successful calculation.
    #[error("nothing to export; calculate an estimate first")]
    NothingToExport,

    /// The renderer failed. The report is still available.
    #[error("export failed: {0}")]
    Render(#[from] RenderError),
}

/// Where the session is in its submit / export / reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Calculated,
    Exported,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Calculated => "calculated",
            Self::Exported => "exported",
        }
    }
}

/// One user's form input, session state, and current report.
///
/// A report is held exactly when the state is `Calculated` or `Exported`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    form: PurchaseInput,
    state: SessionState,
    report: Option<SummaryReport>,
    calculator: LandTransferTaxCalculator<'static>,
    assembler: SummaryAssembler,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &PurchaseInput {
        &self.form
    }

    /// Form fields can be edited in any state; edits take effect on the
    /// next submit.
    pub fn form_mut(&mut self) -> &mut PurchaseInput {
        &mut self.form
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn report(&self) -> Option<&SummaryReport> {
        self.report.as_ref()
    }

    /// Export is only offered once a calculation has succeeded.
    pub fn can_export(&self) -> bool {
        self.report.is_some()
    }

    /// Calculates an estimate from the current form.
    ///
    /// Replaces any earlier report. On invalid input the state and any
    /// existing report are left untouched.
    pub fn submit(&mut self) -> Result<&SummaryReport, SessionError> {
        let gross = self.calculator.calculate(&self.form).inspect_err(|e| {
            warn!(error = %e, "rejected purchase input");
        })?;
        let legal_fee = LegalFeeEstimate::for_price(self.form.price)?;
        let report = self.assembler.assemble(&self.form, &gross, legal_fee);

        info!(
            from = self.state.name(),
            price = %self.form.price,
            city = %self.form.city,
            first_time_buyer = self.form.is_first_time_buyer,
            "estimate calculated"
        );
        self.state = SessionState::Calculated;

        Ok(self.report.insert(report))
    }

    /// Replaces the form with `input` and submits it.
    ///
    /// Unlike editing through [`Session::form_mut`], a rejected `input` is
    /// not kept in the form.
    pub fn submit_input(
        &mut self,
        input: PurchaseInput,
    ) -> Result<&SummaryReport, SessionError> {
        input.validate()?;
        self.form = input;
        self.submit()
    }

    /// Hands the current report to `renderer` and returns the document.
    ///
    /// # Errors
    ///
    /// * [`SessionError::NothingToExport`] while idle.
    /// * [`SessionError::Render`] if the renderer fails; the session stays
    ///   in its current state with the report intact.
    pub fn export(
        &mut self,
        renderer: &dyn DocumentRenderer,
    ) -> Result<DocumentArtifact, SessionError> {
        self.export_to(renderer, Ok)
    }

    /// Renders the current report and passes the document to `deliver`.
    ///
    /// The session moves to `Exported` only once `deliver` succeeds, so a
    /// document that could not be saved does not count as exported.
    ///
    /// # Errors
    ///
    /// Session failures as for [`Session::export`], converted into `E`, or
    /// whatever `deliver` returns. Either way the state is unchanged.
    pub fn export_to<T, E>(
        &mut self,
        renderer: &dyn DocumentRenderer,
        deliver: impl FnOnce(DocumentArtifact) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<SessionError>,
    {
        let report = self.report.as_ref().ok_or(SessionError::NothingToExport)?;

        let artifact = renderer
            .export(report)
            .map_err(SessionError::from)
            .inspect_err(|e| {
                error!(format = renderer.format_name(), error = %e, "document export failed");
            })?;
        let file_name = artifact.file_name.clone();
        let bytes = artifact.bytes.len();

        let delivered = deliver(artifact)?;

        info!(
            from = self.state.name(),
            format = renderer.format_name(),
            file = %file_name,
            bytes,
            "summary exported"
        );
        self.state = SessionState::Exported;

        Ok(delivered)
    }

    /// Discards the report and restores the default form.
    pub fn reset(&mut self) {
        info!(from = self.state.name(), "session reset");
        self.state = SessionState::Idle;
        self.report = None;
        self.form = PurchaseInput::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::City;
    use crate::render::PlainTextRenderer;

    struct FailingRenderer;

    impl DocumentRenderer for FailingRenderer {
        fn format_name(&self) -> &'static str {
            "broken"
        }

        fn mime_type(&self) -> &'static str {
            "application/octet-stream"
        }

        fn render(
            &self,
            _report: &SummaryReport,
        ) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Backend("out of paper".to_string()))
        }
    }

    fn toronto_session() -> Session {
        let mut session = Session::new();
        session
            .submit_input(PurchaseInput::new(dec!(600000), City::Toronto, true).unwrap())
            .unwrap();
        session
    }

    #[test]
    fn new_session_is_idle_with_default_form() {
        let session = Session::new();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.form(), &PurchaseInput::default());
        assert!(!session.can_export());
    }

    #[test]
    fn submit_moves_to_calculated() {
        let session = toronto_session();

        assert_eq!(session.state(), SessionState::Calculated);
        assert!(session.can_export());
        assert_eq!(
            session.report().unwrap().taxes.total_tax(),
            dec!(8475.00)
        );
    }

    #[test]
    fn submit_uses_edited_form() {
        let mut session = Session::new();
        session.form_mut().price = dec!(300000);
        session.form_mut().city = City::Ottawa;

        let report = session.submit().unwrap();

        assert_eq!(report.taxes.total_tax(), dec!(2975.00));
    }

    #[test]
    fn invalid_submit_leaves_state_untouched() {
        let mut session = toronto_session();
        let before = session.report().cloned();
        session.form_mut().price = dec!(-1);

        let result = session.submit();

        assert!(matches!(
            result,
            Err(SessionError::Calculation(CalculationError::InvalidInput(_)))
        ));
        assert_eq!(session.state(), SessionState::Calculated);
        assert_eq!(session.report().cloned(), before);
    }

    #[test]
    fn rejected_submit_input_keeps_previous_form() {
        let mut session = toronto_session();
        let bad = PurchaseInput {
            price: dec!(-10),
            city: City::Ottawa,
            is_first_time_buyer: false,
        };

        assert!(session.submit_input(bad).is_err());
        assert_eq!(session.form().city, City::Toronto);
    }

    #[test]
    fn export_while_idle_is_refused() {
        let mut session = Session::new();

        let result = session.export(&PlainTextRenderer::default());

        assert!(matches!(result, Err(SessionError::NothingToExport)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn export_moves_to_exported_without_changing_report() {
        let mut session = toronto_session();
        let report = session.report().cloned();

        let artifact = session.export(&PlainTextRenderer::default()).unwrap();

        assert_eq!(artifact.file_name, "kalemi_summary.txt");
        assert_eq!(session.state(), SessionState::Exported);
        assert_eq!(session.report().cloned(), report);
    }

    #[test]
    fn export_can_be_repeated() {
        let mut session = toronto_session();
        session.export(&PlainTextRenderer::default()).unwrap();

        let again = session.export(&PlainTextRenderer::default());

        assert!(again.is_ok());
        assert_eq!(session.state(), SessionState::Exported);
    }

    #[test]
    fn failed_export_keeps_calculated_report() {
        let mut session = toronto_session();

        let result = session.export(&FailingRenderer);

        assert!(matches!(result, Err(SessionError::Render(_))));
        assert_eq!(session.state(), SessionState::Calculated);
        assert!(session.can_export());
    }

    #[test]
    fn undelivered_export_keeps_calculated_state() {
        let mut session = toronto_session();

        let result: Result<(), SessionError> =
            session.export_to(&PlainTextRenderer::default(), |_| {
                Err(RenderError::Io(std::io::Error::other("disk full")).into())
            });

        assert!(matches!(result, Err(SessionError::Render(RenderError::Io(_)))));
        assert_eq!(session.state(), SessionState::Calculated);
        assert!(session.can_export());
    }

    #[test]
    fn delivered_export_returns_sink_value() {
        let mut session = toronto_session();

        let name: Result<String, SessionError> =
            session.export_to(&PlainTextRenderer::default(), |artifact| Ok(artifact.file_name));

        assert_eq!(name.unwrap(), "kalemi_summary.txt");
        assert_eq!(session.state(), SessionState::Exported);
    }

    #[test]
    fn reset_returns_to_idle_and_clears_form() {
        let mut session = toronto_session();
        session.export(&PlainTextRenderer::default()).unwrap();

        session.reset();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.form(), &PurchaseInput::default());
        assert!(session.report().is_none());
    }

    #[test]
    fn resubmit_replaces_report() {
        let mut session = toronto_session();

        session
            .submit_input(PurchaseInput::new(dec!(3500000), City::Barrie, false).unwrap())
            .unwrap();

        let report = session.report().unwrap();
        assert_eq!(report.input.city, City::Barrie);
        assert_eq!(report.legal_fee.fee, dec!(2500));
    }
}
