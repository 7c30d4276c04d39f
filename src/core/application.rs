use crate::core::config::Config;
use crate::domain::auth::AuthService;
use crate::domain::org::OrgService;
use crate::domain::team::TeamService;
use crate::domain::timeclock::TimeclockService;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type AUTH: AuthService + Send;
    type ORG: OrgService + Send;
    type TEAM: TeamService + Send;
    type CLOCK: TimeclockService + Send;

    fn config(&self) -> Config;

    fn auth_service(&self) -> Arc<Self::AUTH>;

    fn org_service(&self) -> Arc<Self::ORG>;

    fn team_service(&self) -> Arc<Self::TEAM>;

    fn timeclock_service(&self) -> Arc<Self::CLOCK>;
}

pub struct Application<AUTH, ORG, TEAM, CLOCK>
where
    AUTH: AuthService + Send + Sync + 'static,
    ORG: OrgService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    CLOCK: TimeclockService + Send + Sync + 'static,
{
    config: Config,
    auth_service: Arc<AUTH>,
    org_service: Arc<ORG>,
    team_service: Arc<TEAM>,
    timeclock_service: Arc<CLOCK>,
}

impl<AUTH, ORG, TEAM, CLOCK> Application<AUTH, ORG, TEAM, CLOCK>
where
    AUTH: AuthService + Send + Sync + 'static,
    ORG: OrgService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    CLOCK: TimeclockService + Send + Sync + 'static,
{
    pub fn new(
        config: Config,
        auth_service: AUTH,
        org_service: ORG,
        team_service: TEAM,
        timeclock_service: CLOCK,
    ) -> Self {
        Self {
            config,
            auth_service: Arc::new(auth_service),
            org_service: Arc::new(org_service),
            team_service: Arc::new(team_service),
            timeclock_service: Arc::new(timeclock_service),
        }
    }
}

impl<AUTH, ORG, TEAM, CLOCK> Clone for Application<AUTH, ORG, TEAM, CLOCK>
where
    AUTH: AuthService + Send + Sync + 'static,
    ORG: OrgService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    CLOCK: TimeclockService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            auth_service: self.auth_service.clone(),
            org_service: self.org_service.clone(),
            team_service: self.team_service.clone(),
            timeclock_service: self.timeclock_service.clone(),
        }
    }
}

impl<AUTH, ORG, TEAM, CLOCK> ApplicationServices for Application<AUTH, ORG, TEAM, CLOCK>
where
    AUTH: AuthService + Send + Sync + 'static,
    ORG: OrgService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    CLOCK: TimeclockService + Send + Sync + 'static,
{
    type AUTH = AUTH;
    type ORG = ORG;
    type TEAM = TEAM;
    type CLOCK = CLOCK;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn auth_service(&self) -> Arc<Self::AUTH> {
        self.auth_service.clone()
    }

    fn org_service(&self) -> Arc<Self::ORG> {
        self.org_service.clone()
    }

    fn team_service(&self) -> Arc<Self::TEAM> {
        self.team_service.clone()
    }

    fn timeclock_service(&self) -> Arc<Self::CLOCK> {
        self.timeclock_service.clone()
    }
}
