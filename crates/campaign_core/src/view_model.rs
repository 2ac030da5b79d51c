use crate::state::{impact_label, AppState, CampaignForm, HealthStatus, Predictions, Section};
use crate::{NoticeKind, PROGRESS_STEPS};

/// Default label on the generate trigger.
pub const GENERATE_LABEL: &str = "Generate Campaign";
/// Label while a request is in flight.
pub const GENERATE_BUSY_LABEL: &str = "Generating…";

/// One trend card per city in the market snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendCardView {
    pub city: String,
    pub positions_available: u64,
    pub companies_hiring: u64,
    pub impact: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiView {
    pub active_markets: usize,
    pub total_companies: u64,
    pub total_positions: u64,
}

/// Current values of the result regions. `revealed` flips to true after
/// the first successful generation and stays true.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionsView {
    pub email_subject: Option<String>,
    pub email_body: Option<String>,
    pub social_post: Option<String>,
    pub regional_version: Option<String>,
    pub predictions: Option<Predictions>,
    pub image_url: Option<String>,
    pub revealed: bool,
}

/// Read-only snapshot handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub health: HealthStatus,
    pub active_section: Option<Section>,
    pub trend_cards: Vec<TrendCardView>,
    pub kpis: Option<KpiView>,
    pub form: CampaignForm,
    pub busy: bool,
    pub progress_message: &'static str,
    pub generate_enabled: bool,
    pub generate_label: &'static str,
    pub regions: RegionsView,
    pub error_notice: Option<String>,
    pub success_notice: Option<String>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let trend_cards = self
            .market()
            .map(|snapshot| {
                snapshot
                    .city_performance
                    .iter()
                    .map(|(city, stats)| TrendCardView {
                        city: city.clone(),
                        positions_available: stats.positions_available,
                        companies_hiring: stats.companies_hiring,
                        impact: impact_label(stats.positions_available),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let kpis = self.market().map(|snapshot| KpiView {
            active_markets: snapshot.city_performance.len(),
            total_companies: snapshot.total_companies,
            total_positions: snapshot
                .city_performance
                .values()
                .map(|stats| stats.positions_available)
                .sum(),
        });

        let busy = self.busy();
        let progress_message = busy
            .map(|busy| PROGRESS_STEPS[busy.step])
            .unwrap_or(PROGRESS_STEPS[0]);

        let regions = self.regions();

        AppViewModel {
            health: self.health(),
            active_section: self.active_section(),
            trend_cards,
            kpis,
            form: self.form().clone(),
            busy: busy.is_some(),
            progress_message,
            generate_enabled: busy.is_none(),
            generate_label: if busy.is_some() {
                GENERATE_BUSY_LABEL
            } else {
                GENERATE_LABEL
            },
            regions: RegionsView {
                email_subject: regions.email_subject.clone(),
                email_body: regions.email_body.clone(),
                social_post: regions.social_post.clone(),
                regional_version: regions.regional_version.clone(),
                predictions: regions.predictions.clone(),
                image_url: regions.image_url.clone(),
                revealed: regions.revealed,
            },
            error_notice: self.notice_text(NoticeKind::Error).map(ToOwned::to_owned),
            success_notice: self.notice_text(NoticeKind::Success).map(ToOwned::to_owned),
        }
    }
}
