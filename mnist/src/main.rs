use std::{env, io};

use log::info;

use mnist::{Session, load_config};

fn main() -> io::Result<()> {
    env_logger::init();

    let config = load_config(env::args().nth(1))?;
    let mut session = Session::new(config)?;

    for summary in session.run()? {
        info!(
            "custom {} after {} epochs: accuracy {:.4}, final loss {:?}",
            summary.activation, summary.epochs, summary.accuracy, summary.final_loss
        );
    }

    Ok(())
}
