use dakpath_core::{validate, FieldErrors};
use serde_json::json;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::exit_codes::{SUCCESS, VALIDATION_FAILED};

pub fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    let form = args.order.to_form();
    let result = validate(&form, args.order.lang);

    let code = if result.is_ok() {
        SUCCESS
    } else {
        VALIDATION_FAILED
    };

    match args.format {
        OutputFormat::Json => {
            let errors = result.as_ref().err().cloned().unwrap_or_default();
            let doc = json!({
                "valid": result.is_ok(),
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => match &result {
            Ok(input) => eprintln!(
                "✔ Order {} is valid ({})",
                input.user_order_id(),
                input.transport_mode()
            ),
            Err(errors) => print_field_errors(errors),
        },
    }

    Ok(code)
}

/// Human-readable field errors on stderr.
pub(crate) fn print_field_errors(errors: &FieldErrors) {
    eprintln!(
        "✖ Validation failed ({} field{})",
        errors.len(),
        if errors.len() != 1 { "s" } else { "" }
    );
    for (field, err) in errors.iter() {
        eprintln!("  {field}: {}", err.message);
    }
}
