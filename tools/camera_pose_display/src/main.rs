use camera_pose_display::{run, Args};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut stdout = std::io::stdout().lock();
    run(&args, &mut stdout)?;
    Ok(())
}
