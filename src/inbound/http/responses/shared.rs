use serde::Serialize;

#[derive(Serialize)]
pub enum ResponseType {
    #[serde(rename = "health")]
    Health,

    #[serde(rename = "session")]
    Session,

    #[serde(rename = "profile")]
    Profile,

    #[serde(rename = "organization")]
    Organization,

    #[serde(rename = "invite")]
    Invite,

    #[serde(rename = "team")]
    Team,

    #[serde(rename = "punch")]
    Punch,
}
