use std::{error::Error, process};

use clap::Parser;
use dotenv::dotenv;
use kcal_client::Client;
use kcal_form::{Form, SubmitError};
use kcal_model::biometrics::{ActivityLevel, Sex, UnitSystem};

const DEFAULT_API_URL: &str = "http://localhost:8080";

const ABOUT: &str = "\
Your Basal Metabolic Rate (BMR) is the number of calories your body burns at
rest to maintain vital functions like breathing, circulation, and cell
production.

We use the Mifflin-St Jeor Equation to estimate your BMR, and then multiply it
by your activity level to estimate your daily calorie needs.

BMR Formula (Mifflin-St Jeor):
  For men:   10 × weight + 6.25 × height - 5 × age + 5
  For women: 10 × weight + 6.25 × height - 5 × age - 161";

/// Estimate daily calorie needs from age, weight, height, sex and activity.
#[derive(Parser, Debug)]
#[command(name = "kcal", version)]
struct Args {
    /// Age in years
    #[arg(long)]
    age: Option<String>,

    /// Weight in kg (metric) or lb (imperial)
    #[arg(long)]
    weight: Option<String>,

    /// Height in cm (metric) or in (imperial)
    #[arg(long)]
    height: Option<String>,

    /// male or female
    #[arg(long)]
    sex: Option<Sex>,

    /// metric or imperial
    #[arg(long)]
    units: Option<UnitSystem>,

    /// One of 1.2, 1.375, 1.55, 1.725, 1.9
    #[arg(long)]
    activity: Option<ActivityLevel>,

    /// Base URL of the calculation service
    #[arg(long, env = "KCAL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Explain how the estimate is calculated
    #[arg(long)]
    about: bool,

    /// List the activity levels offered by the service
    #[arg(long)]
    list_activity_levels: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let args = Args::parse();
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("Logging disabled: {}", e);
    }

    if args.about {
        println!("{}", ABOUT);
        return Ok(());
    }

    let client = kcal_client::create(args.api_url);

    if args.list_activity_levels {
        for level in client.activity_levels().await? {
            println!("{:<6} {}", level.factor(), level.label());
        }
        return Ok(());
    }

    let mut form = Form::new(Box::new(client));
    form.set_age(args.age.unwrap_or_default());
    form.set_weight(args.weight.unwrap_or_default());
    form.set_height(args.height.unwrap_or_default());
    if let Some(sex) = args.sex {
        form.set_sex(sex);
    }
    if let Some(unit_system) = args.units {
        form.set_unit_system(unit_system);
    }
    if let Some(activity) = args.activity {
        form.set_activity(activity);
    }

    match form.submit().await {
        Ok(estimate) => {
            println!("Estimated Daily Calories: {} kcal", estimate.total_calories);
            if let Some(bmr) = estimate.bmr {
                println!("Basal Metabolic Rate: {} kcal", bmr);
            }
            Ok(())
        }
        Err(e) => {
            let fields = form.fields().await;
            match e {
                SubmitError::MissingField(_) | SubmitError::InvalidNumber(_) => {
                    eprintln!("{}", e);
                    eprintln!(
                        "Provide --age ({}), --weight ({}) and --height ({})",
                        fields.age_prompt(),
                        fields.weight_prompt(),
                        fields.height_prompt()
                    );
                }
                _ => eprintln!("{}", e),
            }
            process::exit(1);
        }
    }
}
