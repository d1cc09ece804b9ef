use clap::Args;
use roost_app::{
    database::{self, Db},
    domain::rooms::{
        PgRoomsService, RoomsService,
        models::{NewRoom, RoomUuid},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateRoomArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional room UUID; generated when omitted
    #[arg(long)]
    room_uuid: Option<Uuid>,

    /// Room display title
    #[arg(long)]
    title: String,

    /// Sleeping capacity
    #[arg(long, default_value_t = 2)]
    capacity: u16,

    /// Nightly rate in cents
    #[arg(long)]
    nightly_price_cents: u64,

    /// ISO currency code
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Minimum stay length in nights
    #[arg(long, default_value_t = 1)]
    min_nights: u16,

    /// Maximum stay length in nights
    #[arg(long, default_value_t = 30)]
    max_nights: u16,

    /// Location label
    #[arg(long)]
    location: String,

    /// Amenity labels
    #[arg(long)]
    amenity: Vec<String>,

    /// Confirm bookings immediately instead of holding for payment
    #[arg(long)]
    instant_book: bool,
}

pub(crate) async fn run(args: CreateRoomArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgRoomsService::new(Db::new(pool));
    let room_uuid = args.room_uuid.unwrap_or_else(Uuid::now_v7);

    let room = service
        .create_room(NewRoom {
            uuid: RoomUuid::from_uuid(room_uuid),
            title: args.title,
            capacity: args.capacity,
            nightly_price_cents: args.nightly_price_cents,
            currency: args.currency,
            min_nights: args.min_nights,
            max_nights: args.max_nights,
            location: args.location,
            amenities: args.amenity,
            instant_book: args.instant_book,
        })
        .await
        .map_err(|error| format!("failed to create room: {error}"))?;

    println!("room_uuid: {}", room.uuid);
    println!("title: {}", room.title);
    println!("nightly_price_cents: {}", room.nightly_price_cents);
    println!("currency: {}", room.currency);
    println!("created_at: {}", room.created_at);

    Ok(())
}
