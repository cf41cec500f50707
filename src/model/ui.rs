//! UI state enums shared by the app and its screens

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Running,
}

/// Screen currently shown below any modals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    CreateCampaign,
    GenerateCampaign,
    CampaignReview,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::CreateCampaign => "Create Campaign",
            Route::GenerateCampaign => "Generate Campaign",
            Route::CampaignReview => "Campaign Review",
        }
    }
}
