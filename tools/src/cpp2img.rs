use argh::FromArgs;
use lcdbmp_core::decode;
use log::info;

#[derive(FromArgs)]
/// Reconstruct an image from C/C++ bitmap array text.
struct Args {
    /// input source text path
    #[argh(option, short = 'i')]
    input: String,

    /// output image path (written as PNM)
    #[argh(option, short = 'o')]
    output: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let text = std::fs::read_to_string(&args.input).expect("Failed to read input text");

    let decoded = decode::decode(&text).unwrap_or_else(|err| panic!("{err}"));
    info!("decoded a {}x{} bitmap", decoded.width, decoded.height);

    let mut out = image::RgbaImage::new(decoded.width as u32, decoded.height as u32);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let p = decoded.image.get(x as usize, y as usize);
        *pixel = image::Rgba([p.r, p.g, p.b, p.a]);
    }

    // PNM carries no alpha channel
    image::DynamicImage::ImageRgba8(out)
        .to_rgb8()
        .save_with_format(&args.output, image::ImageFormat::Pnm)
        .expect("Failed to write output image");
}
