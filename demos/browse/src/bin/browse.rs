use adopty_client::prelude::*;
use prettytable::{Table, row};
use std::env;

fn animals_table(list: &AnimalList) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Id", "Name", "Gender", "Age", "Breed", "Coat", "Photo"]);
    for animal in &list.animals {
        table.add_row(row![
            animal.id,
            animal.name,
            animal.gender,
            animal.age,
            animal.breed_label(),
            animal.coat.as_deref().unwrap_or("-"),
            animal.cover_photo().unwrap_or("-"),
        ]);
    }
    table
}

fn print_outcome(title: &str, outcome: &QueryOutcome<AnimalList>) {
    match outcome {
        QueryOutcome::InFlight => info!("{title}: still loading"),
        QueryOutcome::Success(list) if list.is_empty() => info!("{title}: no animals found"),
        QueryOutcome::Success(list) => {
            info!("{title}: {} animals", list.len());
            animals_table(list).printstd();
        }
        QueryOutcome::Failure(message) => error!("{title}: {message}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let arg = env::args().nth(1);
    let config = Config::new();
    info!("Using API at {}", config.rest_api.base_url);

    if arg.as_deref() == Some("--logout") {
        HttpClient::new_lazy(config)?.auth().logout()?;
        info!("Stored token removed");
        return Ok(());
    }

    let breed = arg
        .map(|arg| BreedFilter::from(arg.as_str()))
        .unwrap_or(BreedFilter::All);

    let client = Arc::new(Client::connect(config).await?);
    let repository = Arc::new(PetRepository::new(client));

    let breeds: Vec<String> = repository
        .list_known_breeds()
        .iter()
        .map(|b| b.label().to_string())
        .collect();
    info!("Known breeds: {}", breeds.join(", "));

    let home = HomeViewModel::new(repository.clone());
    let special_needs = SpecialNeedsViewModel::new(repository);

    // The default breed query starts with the view model; let it settle so it
    // cannot overwrite the requested breed's outcome.
    home.state().wait_for(|s| !s.animals.is_loading()).await?;
    home.on_breed_selected(breed.clone()).await?;

    let animals = home.animals();
    print_outcome(&format!("Dogs ({breed})"), &animals);

    let mut special_state = special_needs.state();
    let special = special_state.wait_for(|o| !o.is_loading()).await?.clone();
    print_outcome("Dogs needing special care", &special);

    if let Some(first) = animals.payload().and_then(|l| l.animals.first()) {
        home.on_animal_selected(first.clone());
        let selected = home.selected_animal().borrow().clone();
        if let Some(animal) = selected {
            info!("Selected {} ({})", animal.name, animal.breed_label());
            if let Some(description) = &animal.description {
                info!("{description}");
            }
        }
    }

    Ok(())
}
