use crate::infra::{load_school_payloads, seed_schools};
use clap::Args;
use school_locator::error::AppError;
use school_locator::schools::{
    InMemorySchoolRepository, ProximityQuery, RankedSchool, SchoolService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Latitude of the query point in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) latitude: String,
    /// Longitude of the query point in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) longitude: String,
    /// JSON file holding an array of school objects
    #[arg(long)]
    pub(crate) schools: PathBuf,
    /// Only print the nearest N schools
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        latitude,
        longitude,
        schools,
        limit,
    } = args;

    let payloads = load_school_payloads(&schools)?;
    let ranked = rank_payloads(&payloads, ProximityQuery::new(latitude, longitude), limit)?;

    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

pub(crate) fn rank_payloads(
    payloads: &[serde_json::Value],
    query: ProximityQuery,
    limit: Option<usize>,
) -> Result<Vec<RankedSchool>, AppError> {
    let service = SchoolService::new(Arc::new(InMemorySchoolRepository::default()));
    seed_schools(&service, payloads)?;

    let mut ranked = service.list_by_proximity(&query)?;
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}
