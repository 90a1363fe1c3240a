mod metro;

use chrono::{NaiveDate, TimeDelta};
use metro::Metro;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let mut perm = Metro::new("Perm".to_owned());

    perm.create_line("Red")?;
    perm.create_line("Blue")?;

    perm.create_first_station("Red", "Sportivnaya", &[])?;
    perm.create_terminal_station(
        "Red",
        "Medvedkovskaya",
        TimeDelta::minutes(2) + TimeDelta::seconds(21),
        &[],
    )?;
    perm.create_terminal_station(
        "Red",
        "Molodyozhnaya",
        TimeDelta::minutes(1) + TimeDelta::seconds(58),
        &[],
    )?;
    perm.create_terminal_station("Red", "Perm 1", TimeDelta::minutes(3), &["Blue"])?;
    perm.create_terminal_station(
        "Red",
        "Perm 2",
        TimeDelta::minutes(2) + TimeDelta::seconds(10),
        &[],
    )?;
    perm.create_terminal_station(
        "Red",
        "Dvorets Kultury",
        TimeDelta::minutes(4) + TimeDelta::seconds(26),
        &[],
    )?;

    perm.create_first_station("Blue", "Patsanskaya", &[])?;
    perm.create_terminal_station(
        "Blue",
        "Ulitsa Kirova",
        TimeDelta::minutes(1) + TimeDelta::seconds(30),
        &[],
    )?;
    perm.create_terminal_station(
        "Blue",
        "Tyazhmash",
        TimeDelta::minutes(1) + TimeDelta::seconds(47),
        &["Red"],
    )?;
    perm.create_terminal_station(
        "Blue",
        "Nizhnekamskaya",
        TimeDelta::minutes(3) + TimeDelta::seconds(19),
        &[],
    )?;
    perm.create_terminal_station(
        "Blue",
        "Sobornaya",
        TimeDelta::minutes(1) + TimeDelta::seconds(48),
        &[],
    )?;

    print!("{perm}");

    let today = NaiveDate::from_ymd_opt(2026, 8, 28).expect("valid date");

    println!(
        "Tyazhmash on the map: {}",
        perm.station_exists("Tyazhmash")
    );

    let traveled = perm.count_stations("Sportivnaya", "Sobornaya")?;
    println!("Sportivnaya -> Sobornaya: {traveled} stations");

    let price = perm.sell_ticket(today, "Sportivnaya", "Sobornaya")?;
    println!("Sold a ticket for {price}");

    let season_ticket = perm.sell_season_ticket("Perm 1", today)?;
    println!(
        "Sold season ticket {season_ticket}, valid today: {}",
        perm.is_season_ticket_valid(&season_ticket, today)
    );
    perm.extend_season_ticket(&season_ticket, today);

    println!("Network income by date:");
    for (date, amount) in perm.income_report() {
        println!("  {date} - {amount}");
    }

    Ok(())
}
