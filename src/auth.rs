use anyhow::{Result, bail};
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

pub fn read_secret() -> Result<Zeroizing<String>> {
    //  Environment variable
    //  SALTBOX_SECRET="hunter2" saltbox hash
    if let Ok(secret) = std::env::var("SALTBOX_SECRET") {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    //  stdin (pipeline)
    //  printf "%s" "$SECRET" | saltbox hash
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        let secret = buf.trim_end().to_string();

        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    //  Interactive (TTY)
    if io::stdin().is_terminal() {
        let secret = rpassword::prompt_password("Secret: ")?;
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    bail!("No secret provided")
}
