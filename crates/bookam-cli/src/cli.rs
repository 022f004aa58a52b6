//! Command handlers.
//!
//! Every handler borrows the shared [`AppContext`], calls into the core and
//! renders markdown. Checkout steps are stateless between invocations: each
//! prints the draft link the next step takes as its argument.

use anyhow::{anyhow, bail, Context, Result};
use bookam_core::{
    checkout::{ConfirmationPage, PassengerDetailsPage, PaymentPage, SeatSelectionPage},
    config::SessionFile,
    display::{
        booking_columns, bus_columns, route_columns, user_columns, CreateResult, DeleteResult,
        DraftSummary, Notice, PassengerTabs, SeatMap, Table, Ticket, UpdateResult,
    },
    params::{SearchRoutes, UpdateBooking, UpdateBus, UpdateRoute},
    schema::{LoginForm, PaymentForm, RegisterForm},
    AppContext, Backend, BookingApi, BookingDraft, BookingStep, PassengerMode, SeatId,
};
use log::debug;

use crate::{
    args::{
        AccountCommands, BookCommands, BookingCommands, BusCommands, ContactArgs, DraftCommands,
        PassengersArgs, PayArgs, RouteCommands, SelectSeatsArgs, UserCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    ctx: AppContext<Backend>,
    session_file: SessionFile,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Wraps the backend, restoring a saved session if there is one.
    pub fn new(backend: Backend, session_file: SessionFile, renderer: TerminalRenderer) -> Result<Self> {
        let mut ctx = AppContext::new(backend);
        if let Some(session) = session_file
            .load()
            .context("Failed to read the saved session")?
        {
            debug!("Restoring session for {}", session.user.email);
            ctx.restore(session);
        }
        Ok(Self {
            ctx,
            session_file,
            renderer,
        })
    }

    fn notice(&self, notice: Notice) -> Result<()> {
        self.renderer.render(&notice.to_string())
    }

    /// Prints the command for the step a draft is addressed to.
    fn next_step(&self, draft: &BookingDraft) -> Result<()> {
        let href = draft.href()?;
        let command = match draft.step {
            BookingStep::SeatSelection => "seats",
            BookingStep::PassengerDetails => match draft.mode {
                Some(PassengerMode::Single) => "passenger",
                _ => "passengers",
            },
            BookingStep::Payment => "pay",
            BookingStep::Confirmation => "confirm",
        };
        self.renderer.render(&format!(
            "Next: {}\n\n```\nbookam book {command} '{href}'\n```\n",
            draft.step
        ))
    }

    pub async fn handle_account_command(&mut self, command: AccountCommands) -> Result<()> {
        match command {
            AccountCommands::Register(args) => {
                let user = self.ctx.register(&RegisterForm::from(args)).await?;
                let mut output = Notice::success(format!(
                    "Registered {}. Check your email for the confirmation code.",
                    user.email
                ))
                .to_string();
                if let Some(local) = self.ctx.api().as_local() {
                    if let Some(code) = local.confirmation_code(&user.email).await? {
                        output.push_str(&format!(
                            "\nNo mail is sent offline. Your code is **{code}**:\n\n```\nbookam account confirm {} {code}\n```\n",
                            user.email
                        ));
                    }
                }
                self.renderer.render(&output)
            }
            AccountCommands::Confirm(args) => {
                let user = self.ctx.confirm_account(&args.email, &args.code).await?;
                self.notice(Notice::success(format!(
                    "Account {} confirmed. You can log in now.",
                    user.email
                )))
            }
            AccountCommands::Login(args) => {
                let session = self.ctx.login(&LoginForm::from(args)).await?.clone();
                self.session_file.save(&session)?;
                self.notice(Notice::success(format!(
                    "Logged in as {} ({})",
                    session.user.full_name(),
                    session.user.role
                )))
            }
            AccountCommands::Logout => {
                let user = self.ctx.logout();
                let removed = self.session_file.clear()?;
                match user {
                    Some(user) => self.notice(Notice::success(format!("Logged out {}", user.email))),
                    None if removed => self.notice(Notice::success("Logged out")),
                    None => self.notice(Notice::warning("Not logged in")),
                }
            }
            AccountCommands::Whoami => match self.ctx.user() {
                Some(user) => self.renderer.render(&user.to_string()),
                None => self.notice(Notice::warning("Not logged in")),
            },
        }
    }

    pub async fn handle_bus_command(&mut self, command: BusCommands) -> Result<()> {
        match command {
            BusCommands::Create(args) => {
                let bus = self.ctx.create_bus(&args.into()).await?;
                self.renderer.render(&CreateResult::new(bus).to_string())
            }
            BusCommands::List => {
                let columns = bus_columns();
                let buses = self.ctx.refresh_buses().await?;
                let output = format!(
                    "# Buses\n\n{}",
                    Table::new(&columns, buses).with_empty_message("No buses found.")
                );
                self.renderer.render(&output)
            }
            BusCommands::Show(args) => {
                let bus = self.ctx.api().get_bus(args.id).await?;
                self.renderer.render(&bus.to_string())
            }
            BusCommands::Update(args) => {
                let params = UpdateBus::try_from(args).map_err(|e| anyhow!(e))?;
                let changes = bus_changes(&params);
                let bus = self.ctx.update_bus(&params).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(bus, changes).to_string())
            }
            BusCommands::Delete(args) => {
                self.ctx.delete_bus(args.id).await?;
                self.renderer.render(&DeleteResult::new(args.id, "bus").to_string())
            }
        }
    }

    pub async fn handle_route_command(&mut self, command: RouteCommands) -> Result<()> {
        match command {
            RouteCommands::Create(args) => {
                let route = self.ctx.create_route(&args.into()).await?;
                self.renderer.render(&CreateResult::new(route).to_string())
            }
            RouteCommands::List => self.list_routes().await,
            RouteCommands::Search(args) => {
                let params = SearchRoutes::from(args);
                let routes = self.ctx.api().search_routes(&params).await?;
                let columns = route_columns();
                let output = format!(
                    "# Matching routes\n\n{}",
                    Table::new(&columns, &routes).with_empty_message("No routes match your search.")
                );
                self.renderer.render(&output)
            }
            RouteCommands::Show(args) => {
                let route = self.ctx.api().get_route(args.id).await?;
                self.renderer.render(&route.to_string())
            }
            RouteCommands::Update(args) => {
                let params = UpdateRoute::try_from(args).map_err(|e| anyhow!(e))?;
                let route = self.ctx.update_route(&params).await?;
                self.renderer.render(&UpdateResult::new(route).to_string())
            }
            RouteCommands::Delete(args) => {
                self.ctx.delete_route(args.id).await?;
                self.renderer
                    .render(&DeleteResult::new(args.id, "route").to_string())
            }
        }
    }

    /// Default view: upcoming routes.
    pub async fn list_routes(&mut self) -> Result<()> {
        let columns = route_columns();
        let routes = self.ctx.refresh_routes().await?;
        let output = format!(
            "# Routes\n\n{}",
            Table::new(&columns, routes).with_empty_message("No routes found.")
        );
        self.renderer.render(&output)
    }

    pub async fn handle_booking_command(&mut self, command: BookingCommands) -> Result<()> {
        match command {
            BookingCommands::List => {
                let columns = booking_columns();
                let bookings = self.ctx.refresh_bookings().await?;
                let output = format!(
                    "# Bookings\n\n{}",
                    Table::new(&columns, bookings).with_empty_message("No bookings found.")
                );
                self.renderer.render(&output)
            }
            BookingCommands::Show(args) => {
                let booking = self.ctx.get_booking(args.id).await?;
                let route = self.ctx.api().get_route(booking.route_id).await.ok();
                let ticket = Ticket {
                    booking: &booking,
                    route: route.as_ref(),
                };
                self.renderer.render(&ticket.to_string())
            }
            BookingCommands::Cancel(args) => {
                let booking = self.ctx.cancel_booking(args.id).await?;
                self.notice(Notice::success(format!(
                    "Cancelled {}. Seats {} are free again.",
                    booking.reference,
                    booking
                        .seats
                        .iter()
                        .map(SeatId::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
            BookingCommands::Update(args) => {
                let params = UpdateBooking::from(args);
                let booking = self.ctx.update_booking(&params).await?;
                let changes = vec![format!("Status: {}", booking.status)];
                self.renderer
                    .render(&UpdateResult::with_changes(booking, changes).to_string())
            }
            BookingCommands::Delete(args) => {
                self.ctx.delete_booking(args.id).await?;
                self.renderer
                    .render(&DeleteResult::new(args.id, "booking").to_string())
            }
        }
    }

    pub async fn handle_user_command(&mut self, command: UserCommands) -> Result<()> {
        match command {
            UserCommands::List => {
                let columns = user_columns();
                let users = self.ctx.list_users().await?;
                let output = format!(
                    "# Users\n\n{}",
                    Table::new(&columns, &users).with_empty_message("No users found.")
                );
                self.renderer.render(&output)
            }
            UserCommands::Delete(args) => {
                self.ctx.delete_user(args.id).await?;
                self.renderer.render(&DeleteResult::new(args.id, "user").to_string())
            }
        }
    }

    pub async fn handle_book_command(&mut self, command: BookCommands) -> Result<()> {
        match command {
            BookCommands::Seats(args) => self.select_seats(args).await,
            BookCommands::Passengers(args) => self.enter_passengers(args),
            BookCommands::Passenger(args) => self.enter_contact(&args),
            BookCommands::Pay(args) => self.pay(args),
            BookCommands::Confirm(args) => self.confirm(&args.draft).await,
        }
    }

    async fn select_seats(&self, args: SelectSeatsArgs) -> Result<()> {
        let mut page = SeatSelectionPage::load(self.ctx.api(), args.route_id).await?;
        for seat in &args.seats {
            page.toggle(&seat.parse()?)?;
        }
        let mut output = format!("{}", SeatMap(&page));
        if args.seats.is_empty() {
            output.push_str(&format!(
                "\nPick seats with `bookam book seats {} 1A,1B`.\n",
                args.route_id
            ));
            return self.renderer.render(&output);
        }
        self.renderer.render(&output)?;
        let draft = page.proceed(args.mode.map(Into::into))?;
        self.next_step(&draft)
    }

    fn enter_passengers(&self, args: PassengersArgs) -> Result<()> {
        let mut page = match PassengerDetailsPage::from_query(&args.draft)? {
            PassengerDetailsPage::Multi(page) => page,
            PassengerDetailsPage::Single(_) => {
                bail!("This booking has one passenger; use `bookam book passenger` instead")
            }
        };
        if page.blocker().is_some() {
            self.renderer.render(&PassengerTabs(page.wizard()).to_string())?;
            bail!("Cannot enter passengers without seats");
        }
        let slots = page.wizard().slot_count();
        if args.passengers.len() > slots {
            bail!(
                "{} passenger(s) given but only {slots} seat(s) selected",
                args.passengers.len()
            );
        }
        for (index, passenger) in args.passengers.into_iter().enumerate() {
            page.fill(index, passenger.0)?;
        }

        self.renderer.render(&PassengerTabs(page.wizard()).to_string())?;
        let draft = page.submit()?;
        self.next_step(&draft)
    }

    fn enter_contact(&self, args: &ContactArgs) -> Result<()> {
        let mut page = match PassengerDetailsPage::from_query(&args.draft)? {
            PassengerDetailsPage::Single(page) => page,
            PassengerDetailsPage::Multi(_) => {
                bail!("This booking has several passengers; use `bookam book passengers` instead")
            }
        };
        *page.form_mut() = args.into();
        if !page.can_submit() {
            let errors = page.errors();
            self.renderer.render(&format!("{errors}\n"))?;
            bail!("Contact details are incomplete");
        }
        let draft = page.submit()?;
        self.renderer.render(&DraftSummary(&draft).to_string())?;
        self.next_step(&draft)
    }

    fn pay(&self, args: PayArgs) -> Result<()> {
        let mut page = PaymentPage::from_query(&args.draft)?;
        *page.form_mut() = PaymentForm::from(args);
        if !page.can_submit() {
            self.renderer.render(&format!("{}\n", page.errors()))?;
            bail!("Payment details are incomplete");
        }
        let draft = page.submit()?;
        self.renderer.render(&DraftSummary(&draft).to_string())?;
        self.next_step(&draft)
    }

    async fn confirm(&self, draft: &str) -> Result<()> {
        let page = ConfirmationPage::from_query(draft)?;
        let booking = page.confirm(self.ctx.api()).await?;
        let route = self.ctx.api().get_route(booking.route_id).await.ok();
        let ticket = Ticket {
            booking: &booking,
            route: route.as_ref(),
        };
        self.renderer.render_all([
            Notice::success("Booking confirmed").to_string(),
            ticket.to_string(),
        ])
    }

    pub fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::Show(args) => {
                let draft = BookingDraft::from_query(&args.draft)?;
                self.renderer.render(&DraftSummary(&draft).to_string())
            }
            DraftCommands::Schema => {
                let schema = schemars::schema_for!(BookingDraft);
                let json = serde_json::to_string_pretty(&schema)
                    .context("Failed to serialize the draft schema")?;
                println!("{json}");
                Ok(())
            }
        }
    }

    pub async fn seed(&mut self) -> Result<()> {
        let Some(local) = self.ctx.api().as_local() else {
            bail!("Seeding only works with the local database");
        };
        let today = jiff::Zoned::now().date();
        let summary = local.seed(today).await?;
        if summary.buses == 0 {
            return self.notice(Notice::warning("Database already has data; nothing seeded"));
        }
        self.notice(Notice::success(format!(
            "Seeded {} user(s), {} bus(es) and {} route(s)",
            summary.users, summary.buses, summary.routes
        )))?;
        self.list_routes().await
    }
}

/// Human-readable list of the fields an update touches.
fn bus_changes(params: &UpdateBus) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(name) = &params.name {
        changes.push(format!("Name: {name}"));
    }
    if let Some(plate) = &params.plate_number {
        changes.push(format!("Plate: {plate}"));
    }
    if let Some(bus_type) = &params.bus_type {
        changes.push(format!("Type: {bus_type}"));
    }
    if let Some(capacity) = params.capacity {
        changes.push(format!("Seats: {capacity}"));
    }
    if let Some(amenities) = &params.amenities {
        changes.push(format!("Amenities: {}", amenities.join(", ")));
    }
    changes
}
