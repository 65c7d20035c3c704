// Dump a FeliCa card: identity, systems, services and the first blocks of
// every service that reads without encryption.
//
// cargo run --example felica_dump --features native [-- <system code hex>]

use anyhow::{Context, Result};
use felica::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let system = match std::env::args().nth(1) {
        Some(arg) => {
            let bytes = parse_hex(&arg)?;
            let bytes: [u8; 2] = bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("system code must be 2 bytes"))?;
            SystemCode::new(u16::from_be_bytes(bytes))
        }
        None => SystemCode::ANY,
    };

    let mut felica = Felica::open_native(None).context("opening reader")?;

    let info = felica.polling(system).context("polling")?;
    println!("IDm: {}", info.idm().to_hex());
    println!("PMm: {}", info.pmm().to_hex());

    let systems = felica.enum_system_codes().context("enumerating systems")?;
    for sc in systems {
        println!("\n# System code: {}", sc);

        let services = match felica.enum_service_codes(sc) {
            Ok(services) => services,
            Err(e) => {
                println!("  service enumeration failed: {}", e);
                continue;
            }
        };
        for area in felica.area_codes()? {
            println!(
                "  Area {:04X} - {:04X}",
                area.code, area.end_service_code
            );
        }

        for svc in services {
            // bit 0 set: read without encryption allowed
            if svc.as_u16() & 0x01 == 0 {
                continue;
            }
            println!("  Service {}", svc);

            felica.polling(sc).context("re-polling")?;
            for addr in 0..=u8::MAX {
                match felica.read_without_encryption(svc, addr)? {
                    Some(block) => println!(
                        "    {:02x}: {}  {}",
                        addr,
                        block.to_hex(),
                        block.to_ascii_safe()
                    ),
                    None => break,
                }
            }
        }
    }

    felica.close();
    Ok(())
}
