use calc_history::config::AppConfig;
use calc_history::form::OperandForm;
use calc_history::remote::{client, http};
use calc_history::vocabulary::{self, CanonicalOperation};

pub fn cmd_compute(
    operation: CanonicalOperation,
    numbers: &[String],
    config: &AppConfig,
) -> anyhow::Result<i32> {
    let form = OperandForm::from_values(numbers.iter().cloned());
    let operands = form.validate()?;

    let http_client = http::build_client(config.timeout_secs)?;
    let response = client::compute(&http_client, config.base_url(), operation, &operands)?;
    let separator = format!(" {} ", operation.symbol());
    println!("{} = {}", operands.join(separator.as_str()), response.result);
    Ok(0)
}

pub fn cmd_ops() -> i32 {
    for op in CanonicalOperation::ALL {
        println!(
            "{:<9} {}  {}",
            op.as_str(),
            op.symbol(),
            vocabulary::aliases_for(op).join(", ")
        );
    }
    0
}
