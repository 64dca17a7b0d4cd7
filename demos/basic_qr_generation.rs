use std::error::Error;

use qrmint::{encode, ECLevel, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide data & error correction level, everything else is chosen
    let symbol = encode(b"HELLO WORLD", ECLevel::Q);
    println!("{}", symbol.metadata());
    print!("{}", symbol.to_str(1));

    // Builder with progress output, saved as an image
    let symbol = QRBuilder::new(b"Hello, World!").ec_level(ECLevel::H).verbose(true).build()?;
    let img = symbol.to_image(4); // 4 pixels per module
    img.save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    Ok(())
}
