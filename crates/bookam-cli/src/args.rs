//! Command-line arguments.
//!
//! Argument structs carry the clap attributes and convert into the core
//! form or parameter types, so the core stays free of CLI concerns:
//!
//! ```text
//! argv → clap Args → core forms / params → AppContext or checkout pages
//! ```

use std::{path::PathBuf, str::FromStr};

use bookam_core::{
    models::{PassengerEntry, PassengerField, PaymentMethod},
    params::{SearchRoutes, UpdateBooking, UpdateBus, UpdateRoute},
    schema::{BusForm, ContactForm, LoginForm, PaymentForm, RegisterForm, RouteForm},
    BookingStatus, PassengerMode,
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Book intercity bus seats and manage the fleet from the terminal.
///
/// Without `--api-url` (or `BOOKAM_API_URL`) everything runs against a local
/// SQLite database. Run `bookam seed` once to load demo buses and routes.
#[derive(Parser)]
#[command(version, about, name = "bookam")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to `BOOKAM_DATABASE`, then
    /// $XDG_DATA_HOME/bookam/bookam.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Base URL of a bookAM REST backend. Defaults to `BOOKAM_API_URL`
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register, confirm, log in and out
    #[command(alias = "a")]
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Manage buses (admin)
    Bus {
        #[command(subcommand)]
        command: BusCommands,
    },
    /// List, search and manage routes
    #[command(alias = "r")]
    Route {
        #[command(subcommand)]
        command: RouteCommands,
    },
    /// View and manage bookings
    Booking {
        #[command(subcommand)]
        command: BookingCommands,
    },
    /// Manage user accounts (admin)
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Walk through checkout one step at a time
    #[command(alias = "b")]
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Inspect checkout drafts
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Load demo users, buses and routes into the local database
    Seed,
}

// Account

#[derive(ClapArgs)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// At least 8 characters
    #[arg(long)]
    pub password: String,
    /// Defaults to the password
    #[arg(long)]
    pub confirm_password: Option<String>,
}

impl From<RegisterArgs> for RegisterForm {
    fn from(val: RegisterArgs) -> Self {
        let confirm_password = val.confirm_password.unwrap_or_else(|| val.password.clone());
        RegisterForm {
            first_name: val.first_name,
            last_name: val.last_name,
            email: val.email,
            phone: val.phone,
            password: val.password,
            confirm_password,
        }
    }
}

#[derive(ClapArgs)]
pub struct ConfirmArgs {
    pub email: String,
    /// Code from the confirmation email
    pub code: String,
}

#[derive(ClapArgs)]
pub struct LoginArgs {
    pub email: String,
    #[arg(long)]
    pub password: String,
}

impl From<LoginArgs> for LoginForm {
    fn from(val: LoginArgs) -> Self {
        LoginForm {
            email: val.email,
            password: val.password,
        }
    }
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a customer account
    Register(RegisterArgs),
    /// Confirm an account with the emailed code
    Confirm(ConfirmArgs),
    /// Log in and remember the session
    Login(LoginArgs),
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
}

// Buses

#[derive(ClapArgs)]
pub struct IdArgs {
    pub id: u64,
}

#[derive(ClapArgs)]
pub struct CreateBusArgs {
    pub name: String,
    #[arg(long)]
    pub plate: String,
    /// standard, executive or luxury
    #[arg(long = "type", default_value = "standard")]
    pub bus_type: String,
    #[arg(long)]
    pub capacity: String,
    /// Comma-separated list, e.g. "AC, WiFi"
    #[arg(long, default_value = "")]
    pub amenities: String,
}

impl From<CreateBusArgs> for BusForm {
    fn from(val: CreateBusArgs) -> Self {
        BusForm {
            name: val.name,
            plate_number: val.plate,
            bus_type: val.bus_type,
            capacity: val.capacity,
            amenities: val.amenities,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateBusArgs {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub plate: Option<String>,
    #[arg(long = "type")]
    pub bus_type: Option<String>,
    #[arg(long)]
    pub capacity: Option<u32>,
    #[arg(long, value_delimiter = ',')]
    pub amenities: Option<Vec<String>>,
}

impl TryFrom<UpdateBusArgs> for UpdateBus {
    type Error = String;

    fn try_from(val: UpdateBusArgs) -> Result<Self, Self::Error> {
        Ok(UpdateBus {
            id: val.id,
            name: val.name,
            plate_number: val.plate,
            bus_type: val.bus_type.as_deref().map(str::parse).transpose()?,
            capacity: val.capacity,
            amenities: val
                .amenities
                .map(|list| list.into_iter().map(|a| a.trim().to_string()).collect()),
        })
    }
}

#[derive(Subcommand)]
pub enum BusCommands {
    /// Register a bus
    #[command(alias = "c")]
    Create(CreateBusArgs),
    /// List all buses
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one bus
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change bus details
    #[command(alias = "u")]
    Update(UpdateBusArgs),
    /// Delete a bus and its routes
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// Routes

#[derive(ClapArgs)]
pub struct CreateRouteArgs {
    #[arg(long)]
    pub bus: String,
    #[arg(long)]
    pub from: String,
    #[arg(long)]
    pub to: String,
    /// Local departure time, e.g. 2025-06-02T07:00
    #[arg(long)]
    pub departs: String,
    /// Local arrival time
    #[arg(long)]
    pub arrives: String,
    /// Fare per seat in naira
    #[arg(long)]
    pub price: String,
}

impl From<CreateRouteArgs> for RouteForm {
    fn from(val: CreateRouteArgs) -> Self {
        RouteForm {
            bus_id: val.bus,
            from_city: val.from,
            to_city: val.to,
            departure_time: val.departs,
            arrival_time: val.arrives,
            price: val.price,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateRouteArgs {
    pub id: u64,
    #[arg(long)]
    pub bus: Option<u64>,
    #[arg(long)]
    pub from: Option<String>,
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub departs: Option<String>,
    #[arg(long)]
    pub arrives: Option<String>,
    #[arg(long)]
    pub price: Option<u64>,
}

impl TryFrom<UpdateRouteArgs> for UpdateRoute {
    type Error = String;

    fn try_from(val: UpdateRouteArgs) -> Result<Self, Self::Error> {
        let parse_time = |raw: Option<String>| {
            raw.map(|t| {
                t.trim()
                    .parse()
                    .map_err(|e| format!("Invalid date and time '{t}': {e}"))
            })
            .transpose()
        };
        Ok(UpdateRoute {
            id: val.id,
            bus_id: val.bus,
            from_city: val.from,
            to_city: val.to,
            departure_time: parse_time(val.departs)?,
            arrival_time: parse_time(val.arrives)?,
            price: val.price,
        })
    }
}

#[derive(ClapArgs)]
pub struct SearchRoutesArgs {
    #[arg(long)]
    pub from: Option<String>,
    #[arg(long)]
    pub to: Option<String>,
    /// Travel date, e.g. 2025-06-02
    #[arg(long)]
    pub date: Option<jiff::civil::Date>,
}

impl From<SearchRoutesArgs> for SearchRoutes {
    fn from(val: SearchRoutesArgs) -> Self {
        SearchRoutes {
            from: val.from,
            to: val.to,
            date: val.date,
        }
    }
}

#[derive(Subcommand)]
pub enum RouteCommands {
    /// Schedule a trip (admin)
    #[command(alias = "c")]
    Create(CreateRouteArgs),
    /// List all routes
    #[command(aliases = ["l", "ls"])]
    List,
    /// Find routes by city and date
    #[command(alias = "f")]
    Search(SearchRoutesArgs),
    /// Show one route
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change a route (admin)
    #[command(alias = "u")]
    Update(UpdateRouteArgs),
    /// Delete a route (admin)
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// Bookings

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BookingStatusArg {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<BookingStatusArg> for BookingStatus {
    fn from(val: BookingStatusArg) -> Self {
        match val {
            BookingStatusArg::Pending => BookingStatus::Pending,
            BookingStatusArg::Confirmed => BookingStatus::Confirmed,
            BookingStatusArg::Cancelled => BookingStatus::Cancelled,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateBookingArgs {
    pub id: u64,
    #[arg(long)]
    pub status: BookingStatusArg,
}

impl From<UpdateBookingArgs> for UpdateBooking {
    fn from(val: UpdateBookingArgs) -> Self {
        UpdateBooking {
            id: val.id,
            status: Some(BookingStatus::from(val.status).as_str().to_string()),
        }
    }
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// List bookings (your own, or all for admins)
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a booking as a ticket
    #[command(alias = "s")]
    Show(IdArgs),
    /// Cancel one of your bookings and release its seats
    Cancel(IdArgs),
    /// Set a booking's status (admin)
    #[command(alias = "u")]
    Update(UpdateBookingArgs),
    /// Delete a booking (admin)
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all accounts
    #[command(aliases = ["l", "ls"])]
    List,
    /// Delete an account
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// Checkout

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PassengerModeArg {
    Single,
    Multi,
}

impl From<PassengerModeArg> for PassengerMode {
    fn from(val: PassengerModeArg) -> Self {
        match val {
            PassengerModeArg::Single => PassengerMode::Single,
            PassengerModeArg::Multi => PassengerMode::Multi,
        }
    }
}

/// One passenger as `key=value` pairs separated by commas, e.g.
/// `title=Mr,first=Ada,last=Obi,email=ada@example.com,phone=08030000000,terms=yes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerArg(pub PassengerEntry);

impl FromStr for PassengerArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entry = PassengerEntry::default();
        for pair in s.split(',').filter(|p| !p.trim().is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(format!("Expected key=value, got '{pair}'"));
            };
            let field: PassengerField = key.trim().parse()?;
            entry.set(field, value.trim());
        }
        Ok(PassengerArg(entry))
    }
}

#[derive(ClapArgs)]
pub struct SelectSeatsArgs {
    pub route_id: u64,
    /// Seats to select, e.g. 1A,1B. Omit to only show the seat map
    #[arg(value_delimiter = ',')]
    pub seats: Vec<String>,
    /// Force the single or multi passenger form
    #[arg(long)]
    pub mode: Option<PassengerModeArg>,
}

#[derive(ClapArgs)]
pub struct PassengersArgs {
    /// Draft link printed by the previous step
    pub draft: String,
    /// Passenger details in seat order; repeat once per seat
    #[arg(short, long = "passenger")]
    pub passengers: Vec<PassengerArg>,
}

#[derive(ClapArgs)]
pub struct ContactArgs {
    pub draft: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
}

impl From<&ContactArgs> for ContactForm {
    fn from(val: &ContactArgs) -> Self {
        ContactForm {
            full_name: val.name.clone(),
            email: val.email.clone(),
            phone: val.phone.clone(),
        }
    }
}

#[derive(ClapArgs)]
pub struct PayArgs {
    pub draft: String,
    /// Pay cash at the terminal instead of by card
    #[arg(long, conflicts_with_all = ["card_name", "card_number", "expiry", "cvv"])]
    pub cash: bool,
    #[arg(long)]
    pub card_name: Option<String>,
    #[arg(long)]
    pub card_number: Option<String>,
    /// MM/YY
    #[arg(long)]
    pub expiry: Option<String>,
    #[arg(long)]
    pub cvv: Option<String>,
}

impl From<PayArgs> for PaymentForm {
    fn from(val: PayArgs) -> Self {
        if val.cash {
            return PaymentForm::cash();
        }
        PaymentForm {
            method: PaymentMethod::Online,
            card_name: val.card_name.unwrap_or_default(),
            card_number: val.card_number.unwrap_or_default(),
            expiry_date: val.expiry.unwrap_or_default(),
            cvv: val.cvv.unwrap_or_default(),
        }
    }
}

#[derive(ClapArgs)]
pub struct DraftArgs {
    pub draft: String,
}

#[derive(Subcommand)]
pub enum BookCommands {
    /// Show a route's seat map and pick seats
    Seats(SelectSeatsArgs),
    /// Enter details for every passenger
    Passengers(PassengersArgs),
    /// Enter the contact for a one-seat booking
    Passenger(ContactArgs),
    /// Choose how to pay
    Pay(PayArgs),
    /// Place the booking and print the ticket
    Confirm(DraftArgs),
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Decode a draft link
    Show(DraftArgs),
    /// Print the JSON Schema of the draft
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passenger_arg_parsing() {
        let PassengerArg(entry) =
            "title=Mrs, first=Ada ,last=Obi,dob=1990-01-01,terms=yes".parse().unwrap();
        assert_eq!(entry.title, "Mrs");
        assert_eq!(entry.first_name, "Ada");
        assert_eq!(entry.date_of_birth, "1990-01-01");
        assert!(entry.terms_accepted);

        assert!("first".parse::<PassengerArg>().is_err());
        assert!("shoe=42".parse::<PassengerArg>().is_err());
    }

    #[test]
    fn test_update_bus_conversion() {
        let params = UpdateBus::try_from(UpdateBusArgs {
            id: 2,
            name: None,
            plate: None,
            bus_type: Some("luxury".into()),
            capacity: Some(20),
            amenities: Some(vec!["AC".into(), " WiFi".into()]),
        })
        .unwrap();
        assert_eq!(params.capacity, Some(20));
        assert_eq!(params.amenities, Some(vec!["AC".to_string(), "WiFi".to_string()]));
    }

    #[test]
    fn test_cash_ignores_card_fields() {
        let form = PaymentForm::from(PayArgs {
            draft: String::new(),
            cash: true,
            card_name: None,
            card_number: None,
            expiry: None,
            cvv: None,
        });
        assert_eq!(form, PaymentForm::cash());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
