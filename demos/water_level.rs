// demos/water_level.rs
use chrono::NaiveDate;
use coops::{Coops, CoopsError, DateRange};

#[tokio::main]
async fn main() -> Result<(), CoopsError> {
    // Set RUST_LOG=info to see each request as it is sent
    env_logger::init();

    // San Francisco, CA
    let station_id = "9414290";
    let range = DateRange::from_dates(
        NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 4, 30).unwrap(),
    );

    let client = Coops::new()?;
    let retrieval = client
        .get_data()
        .station(station_id)
        .range(range)
        .call()
        .await?;

    println!("Errors: {:?}", retrieval.errors.reported());

    let Some(table) = retrieval.data.as_columns() else {
        return Ok(());
    };
    println!("Returned keys: {:?}", table.names().collect::<Vec<_>>());

    if let (Some(times), Some(levels)) = (table.column("Date Time"), table.column("Water Level")) {
        for (time, level) in times.iter().zip(levels) {
            println!("{} {}", time, level);
        }
    }

    println!("{}", table.to_dataframe()?);
    Ok(())
}
