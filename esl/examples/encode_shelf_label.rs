//! Build the packets for a small price label and dump them
//!
//! Run with `RUST_LOG=debug` to see the codec trace.

use esl::{
    AcknowledgementPacket, BarcodeEntity, Bitmap, DrawStyle, Entity, EntityKind, FontStyle,
    ImageEntity, LedColor, LedEntity, LineEntity, RectangleEntity, TextEntity,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WIDTH: u16 = 200;
const HEIGHT: u16 = 96;

/// Red "sale" ribbon in the top right corner
fn ribbon() -> esl::Result<Bitmap> {
    let pixels = WIDTH as usize * HEIGHT as usize;
    let mut black = vec![false; pixels];
    let mut spot = vec![false; pixels];
    for y in 0..HEIGHT as usize {
        for x in 0..WIDTH as usize {
            let i = y * WIDTH as usize + x;
            black[i] = y == 0 || y == HEIGHT as usize - 1;
            spot[i] = x + 24 >= WIDTH as usize && y < 24;
        }
    }
    Ok(Bitmap::with_spot(WIDTH, HEIGHT, black, spot)?)
}

fn main() -> esl::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let entities: Vec<Entity> = vec![
        ImageEntity::new(FontStyle::ImageCompress, 0, 0, &ribbon()?)?.into(),
        TextEntity::new(8, 4, FontStyle::Px16, "Kaffe 500 g")?.into(),
        TextEntity::new(32, 4, FontStyle::Px48x24, "49,95")?
            .with_draw_style(DrawStyle::Red)
            .into(),
        LineEntity::horizontal_line(84, 4, 1)?.into(),
        BarcodeEntity::new(60, 100, FontStyle::BarcodeEan13, "731000000941")?.into(),
        RectangleEntity::new(88, 4, 4, 192)?.into(),
        LedEntity::new(LedColor::GREEN | LedColor::BLUE, 20003, 3)?.into(),
    ];

    for entity in &entities {
        let packet = entity.encode()?;
        info!(kind = %entity.kind(), len = packet.len(), "Encoded entity");
        println!("{}", packet);
        println!("{}", entity);
    }

    // Decode what the tag sent back
    let ack = AcknowledgementPacket::decode("@00124E23061C95AD541F11")?;
    println!("{}", ack);
    if !ack.tag_status().is_success() {
        return Err(esl::Error::InvalidResponse(format!(
            "tag {} answered {}",
            ack.display_tag_id(),
            ack.tag_status()
        )));
    }

    // Frames survive a trip through raw bytes
    let frame = entities[1].to_bytes()?;
    let decoded = Entity::from_bytes(EntityKind::Text, &frame)?;
    info!(equal = decoded == entities[1], "Decoded text frame");

    Ok(())
}
