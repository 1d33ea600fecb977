// universe-client/examples/join_club.rs
// Sign in, apply to a club, follow the checkout if the club charges a fee

use universe_client::membership::catalog::Skill;
use universe_client::{ApplicationInput, ClientConfig, ConfirmationFlow, SubmitOutcome, UniverseClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env();
    universe_client::logger::init_from_config(&config)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <email> <password> <club_id> [success_redirect_url]", args[0]);
        println!("  Example: {} ana@uni.lk secret 3", args[0]);
        return Ok(());
    }
    let club_id: i64 = args[3].parse()?;

    let client = UniverseClient::connect(config)?;
    let user = match client.session().restore().await? {
        Some(user) => user,
        None => client.session().login(&args[1], &args[2]).await?,
    };
    tracing::info!("Signed in as {}", user.full_name());

    // Second run: pass the URL the checkout page redirected to
    if let Some(redirect) = args.get(4) {
        let mut flow = ConfirmationFlow::from_redirect(redirect);
        let outcome = flow.run(client.workflow()).await;
        tracing::info!("Confirmation: {:?}", outcome);
        println!("Next: {}", outcome.next().route());
        return Ok(());
    }

    let club = client.api().club(club_id).await?;
    let input = ApplicationInput {
        full_name: user.full_name(),
        address: "12 Lake Road, Kandy".into(),
        contact_number: "0771234567".into(),
        birthday: "2003-05-01".into(),
        faculty: "Faculty of Science".into(),
        year: "2nd Year".into(),
        skills: vec![Skill::Leadership.label().into(), Skill::Photography.label().into()],
    };

    match client.workflow().submit(&user, &club, &input).await {
        Ok(SubmitOutcome::Joined(membership)) => {
            println!("Joined {} (membership {})", club.name, membership.id);
        }
        Ok(SubmitOutcome::RedirectToCheckout { url }) => {
            println!("Open this page to pay: {}", url);
        }
        Err(e) => {
            tracing::error!("Join failed: {}", e);
            println!("{}", e.user_message());
        }
    }
    Ok(())
}
