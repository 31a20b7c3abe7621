use argh::FromArgs;
use lcdbmp_core::{
    bitmap::{PixelBuffer, Rgba},
    encode,
    options::{EncodingOptions, NumericFormat, OutputProfile},
};
use log::info;

#[derive(FromArgs)]
/// Convert a monochrome image into a C/C++ bitmap array.
struct Args {
    /// input image path (uncompressed PNM)
    #[argh(option, short = 'i')]
    input: String,

    /// output file path, stdout when omitted
    #[argh(option, short = 'o')]
    output: Option<String>,

    /// array identifier, freshly generated when omitted
    #[argh(option, short = 'n')]
    name: Option<String>,

    /// output profile: generic, boot or status
    #[argh(option, short = 'p', default = "String::from(\"generic\")")]
    profile: String,

    /// invert pixel polarity
    #[argh(switch)]
    invert: bool,

    /// emit binary literals instead of hex
    #[argh(switch, short = 'b')]
    binary: bool,

    /// append an ASCII preview to each row
    #[argh(switch, short = 'a')]
    ascii: bool,

    /// half-width ASCII preview, implies --ascii
    #[argh(switch)]
    skinny: bool,

    /// push a narrow status graphic to the right edge
    #[argh(switch)]
    right_justify: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let profile: OutputProfile = args.profile.parse().expect("Unknown output profile");

    let image = image::open(&args.input)
        .expect("Failed to open input image")
        .to_rgba8();
    info!("read {}x{} image", image.width(), image.height());

    let pixels = image
        .pixels()
        .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
        .collect();
    let buffer = PixelBuffer::new(image.width() as usize, image.height() as usize, pixels);

    let options = EncodingOptions {
        invert: args.invert,
        format: if args.binary {
            NumericFormat::Binary
        } else {
            NumericFormat::Hex
        },
        ascii_preview: args.ascii || args.skinny,
        skinny_ascii: args.skinny,
        profile,
        right_justify: args.right_justify,
        name: args.name.unwrap_or_else(|| random_name("bitmap_")),
    };
    let source = format!("the file '{}'", args.input);

    let text = encode::encode(&buffer, &options, &source).unwrap_or_else(|err| panic!("{err}"));

    match &args.output {
        Some(path) => std::fs::write(path, text).expect("Failed to write output file"),
        None => print!("{text}"),
    }
}

/// Fresh identifier per conversion, so coexisting outputs cannot collide.
fn random_name(prefix: &str) -> String {
    let mut suffix = rand::random::<u32>();
    let mut name = String::from(prefix);
    for _ in 0..6 {
        name.push(char::from_digit(suffix % 36, 36).expect("base-36 digit"));
        suffix /= 36;
    }
    name
}
