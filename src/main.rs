fn main() -> eframe::Result {
    mask_painter::run_native(Box::new(|data_url| {
        log::debug!("Mask changed ({} bytes)", data_url.len());
    }))
}
