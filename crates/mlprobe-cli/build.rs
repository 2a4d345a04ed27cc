use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build metadata shown by `mlprobe info`
    EmitBuilder::builder().build_timestamp().rustc_semver().cargo_target_triple().emit()?;

    Ok(())
}
