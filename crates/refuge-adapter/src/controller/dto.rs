//! Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};

use refuge_domain::{Location, NewSurvivor, Report, Robot, SurvivorView};

/// Body of `POST /survivor`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSurvivorRequest {
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl From<CreateSurvivorRequest> for NewSurvivor {
    fn from(req: CreateSurvivorRequest) -> Self {
        NewSurvivor {
            name: req.name,
            age: req.age,
            gender: req.gender,
            location: Location::new(req.latitude, req.longitude),
            resources: req.resources,
        }
    }
}

/// Body of `PUT /survivor/:id`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<UpdateLocationRequest> for Location {
    fn from(req: UpdateLocationRequest) -> Self {
        Location::new(req.latitude, req.longitude)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CoordinatesDto {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for CoordinatesDto {
    fn from(l: Location) -> Self {
        Self {
            latitude: l.latitude,
            longitude: l.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurvivorDto {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub last_known_location: CoordinatesDto,
    pub resources: Vec<String>,
    pub is_infected: bool,
}

impl From<SurvivorView> for SurvivorDto {
    fn from(v: SurvivorView) -> Self {
        Self {
            id: v.id.value(),
            name: v.name,
            age: v.age,
            gender: v.gender,
            last_known_location: v.last_known_location.into(),
            resources: v.resources,
            is_infected: v.is_infected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RobotDto {
    pub model: String,
    pub serial_number: String,
    pub manufactured_date: String,
    pub category: String,
}

impl From<Robot> for RobotDto {
    fn from(r: Robot) -> Self {
        Self {
            model: r.model,
            serial_number: r.serial_number,
            manufactured_date: r.manufactured_date,
            category: r.category,
        }
    }
}

/// Body of `GET /report`. Percentages are `null` when nobody is registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDto {
    #[serde(rename = "percentage_of_infected_survivors")]
    pub percentage_infected: Option<f64>,
    #[serde(rename = "percentage_of_non_infected_survivors")]
    pub percentage_non_infected: Option<f64>,
    pub infected_survivors: Vec<SurvivorDto>,
    pub non_infected_survivors: Vec<SurvivorDto>,
    pub robots: Vec<RobotDto>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl From<Report> for ReportDto {
    fn from(r: Report) -> Self {
        Self {
            percentage_infected: finite(r.percentage_infected),
            percentage_non_infected: finite(r.percentage_non_infected),
            infected_survivors: r.infected.into_iter().map(Into::into).collect(),
            non_infected_survivors: r.non_infected.into_iter().map(Into::into).collect(),
            robots: r.robots.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse {
    pub survivor_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultResponse {
    pub result: String,
}

impl ResultResponse {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
