#[path = "../common/mod.rs"]
mod common;

use common::{args, fixtures, mock_responses, DEAD_URL};
use mockito::{Matcher, Server};
use relay_cli::backend::{BackendClient, PokeApiClient};
use relay_cli::commands::csv::{GetCommand, StatsCommand, GET_USAGE};
use relay_cli::commands::pokemon::{PokemonCommand, NOT_FOUND_MESSAGE, POKEAPI_DOWN_MESSAGE};
use relay_cli::commands::weather::{WeatherCommand, USAGE as WEATHER_USAGE};
use relay_cli::commands::{CommandHandler, CommandOutput, Output, SERVER_DOWN_MESSAGE, UNEXPECTED_REPLY_MESSAGE};

fn json_body(value: serde_json::Value) -> String {
    value.to_string()
}

// ---- weather ----

#[tokio::test]
async fn test_weather_reports_server_message() {
    common::setup();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("lat".into(), "41.8268".into()),
            Matcher::UrlEncoded("lon".into(), "-71.4029".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(json_body(mock_responses::success("The temperature is 55°F.")))
        .create_async()
        .await;

    let weather = WeatherCommand::new(BackendClient::new(server.url(), None));
    let out = weather.execute(&args(&["41.8268", "-71.4029"])).await;

    mock.assert_async().await;
    assert_eq!(out, CommandOutput::message(true, "The temperature is 55°F."));
}

#[tokio::test]
async fn test_weather_error_result_is_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(json_body(mock_responses::error(
            "error_bad_request",
            "Latitude and longitude values should be numbers.",
        )))
        .create_async()
        .await;

    let weather = WeatherCommand::new(BackendClient::new(server.url(), None));
    let out = weather.execute(&args(&["bla", "bla"])).await;

    assert_eq!(out, CommandOutput::failure("Latitude and longitude values should be numbers."));
}

#[tokio::test]
async fn test_weather_wrong_arity_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let weather = WeatherCommand::new(BackendClient::new(server.url(), None));
    assert_eq!(weather.execute(&[]).await, CommandOutput::failure(WEATHER_USAGE));
    assert_eq!(weather.execute(&args(&["1"])).await, CommandOutput::failure(WEATHER_USAGE));
    assert_eq!(weather.execute(&args(&["1", "2", "3"])).await, CommandOutput::failure(WEATHER_USAGE));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_weather_server_down() {
    let weather = WeatherCommand::new(BackendClient::new(DEAD_URL, None));
    let out = weather.execute(&args(&["41.8", "-71.4"])).await;
    assert_eq!(out, CommandOutput::failure(SERVER_DOWN_MESSAGE));
}

#[tokio::test]
async fn test_weather_garbage_reply() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/weather")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let weather = WeatherCommand::new(BackendClient::new(server.url(), None));
    let out = weather.execute(&args(&["1", "2"])).await;
    assert_eq!(out, CommandOutput::failure(UNEXPECTED_REPLY_MESSAGE));
}

// ---- get / stats ----

#[tokio::test]
async fn test_get_loads_then_shows_table() {
    let mut server = Server::new_async().await;
    let load = server
        .mock("GET", "/loadcsv")
        .match_query(Matcher::UrlEncoded("filepath".into(), fixtures::ABC_CSV_PATH.into()))
        .with_body(json_body(mock_responses::success("loaded")))
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/getcsv")
        .with_body(json_body(serde_json::json!({"result": "success", "data": fixtures::abc_rows()})))
        .create_async()
        .await;

    let get = GetCommand::new(BackendClient::new(server.url(), None));
    let out = get.execute(&args(&[fixtures::ABC_CSV_PATH])).await;

    load.assert_async().await;
    fetch.assert_async().await;
    assert!(out.success);
    assert_eq!(out.output, Output::Table(fixtures::abc_rows()));
    assert_eq!(out.label, fixtures::ABC_CSV_LABEL);
}

#[tokio::test]
async fn test_get_empty_csv() {
    let mut server = Server::new_async().await;
    let _load = server
        .mock("GET", "/loadcsv")
        .match_query(Matcher::Any)
        .with_body(json_body(mock_responses::success("loaded")))
        .create_async()
        .await;
    let _fetch = server
        .mock("GET", "/getcsv")
        .with_body(r#"{"result":"success","data":[]}"#)
        .create_async()
        .await;

    let get = GetCommand::new(BackendClient::new(server.url(), None));
    let out = get.execute(&args(&[fixtures::EMPTY_CSV_PATH])).await;

    assert!(out.success);
    assert_eq!(out.label, ". END CSV.");
    assert_eq!(out.output, Output::Table(Vec::new()));
}

#[tokio::test]
async fn test_get_missing_file_stops_after_load() {
    let mut server = Server::new_async().await;
    let _load = server
        .mock("GET", "/loadcsv")
        .match_query(Matcher::Any)
        .with_body(json_body(mock_responses::error(
            "error_datasource",
            "File 'nonexistentFile' not found.",
        )))
        .create_async()
        .await;
    let fetch = server.mock("GET", "/getcsv").expect(0).create_async().await;

    let get = GetCommand::new(BackendClient::new(server.url(), None));
    let out = get.execute(&args(&["nonexistentFile"])).await;

    fetch.assert_async().await;
    assert_eq!(out, CommandOutput::failure("File 'nonexistentFile' not found."));
}

#[tokio::test]
async fn test_get_missing_file_reported_with_404() {
    let mut server = Server::new_async().await;
    let _load = server
        .mock("GET", "/loadcsv")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json_body(mock_responses::error("error_datasource", "File 'x.csv' not found.")))
        .create_async()
        .await;
    let fetch = server.mock("GET", "/getcsv").expect(0).create_async().await;

    let get = GetCommand::new(BackendClient::new(server.url(), None));
    let out = get.execute(&args(&["x.csv"])).await;

    fetch.assert_async().await;
    assert_eq!(out, CommandOutput::failure("File 'x.csv' not found."));
}

#[tokio::test]
async fn test_stats_404_without_json_is_unexpected() {
    let mut server = Server::new_async().await;
    let _stats = server
        .mock("GET", "/statscsv")
        .with_status(404)
        .with_body("Cannot GET /statscsv")
        .create_async()
        .await;

    let stats = StatsCommand::new(BackendClient::new(server.url(), None));
    assert_eq!(stats.execute(&[]).await, CommandOutput::failure(UNEXPECTED_REPLY_MESSAGE));
}

#[tokio::test]
async fn test_get_without_path() {
    let get = GetCommand::new(BackendClient::new(DEAD_URL, None));
    let out = get.execute(&[]).await;
    assert_eq!(out, CommandOutput::failure(GET_USAGE));
    assert_eq!(out.label, "'get' requires one input: the filepath of your CSV.");
}

#[tokio::test]
async fn test_get_server_down() {
    let get = GetCommand::new(BackendClient::new(DEAD_URL, None));
    let out = get.execute(&args(&[fixtures::ABC_CSV_PATH])).await;
    assert_eq!(out, CommandOutput::failure(SERVER_DOWN_MESSAGE));
}

#[tokio::test]
async fn test_stats_of_empty_csv() {
    let mut server = Server::new_async().await;
    let _stats = server
        .mock("GET", "/statscsv")
        .with_body(json_body(mock_responses::success("0 rows, 0 columns.")))
        .create_async()
        .await;

    let stats = StatsCommand::new(BackendClient::new(server.url(), None));
    let out = stats.execute(&[]).await;
    assert_eq!(out, CommandOutput::message(true, "0 rows, 0 columns."));
}

#[tokio::test]
async fn test_stats_before_load() {
    let mut server = Server::new_async().await;
    let _stats = server
        .mock("GET", "/statscsv")
        .with_body(json_body(mock_responses::error("error_datasource", "No CSV has been loaded.")))
        .create_async()
        .await;

    let stats = StatsCommand::new(BackendClient::new(server.url(), None));
    let out = stats.execute(&[]).await;
    assert!(!out.success);
    assert_eq!(out.label, "No CSV has been loaded.");
}

#[tokio::test]
async fn test_stats_server_down() {
    let stats = StatsCommand::new(BackendClient::new(DEAD_URL, None));
    assert_eq!(stats.execute(&[]).await, CommandOutput::failure(SERVER_DOWN_MESSAGE));
}

// ---- pokemon ----

#[tokio::test]
async fn test_pokemon_lookup_is_lowercased() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/pokemon/charizard")
        .with_body(json_body(mock_responses::charizard()))
        .create_async()
        .await;

    let pokemon = PokemonCommand::new(PokeApiClient::new(format!("{}/api/v2/pokemon/", server.url()), None));
    let out = pokemon.execute(&args(&["Charizard"])).await;

    mock.assert_async().await;
    assert!(out.success);
    assert_eq!(out.label, mock_responses::CHARIZARD_LABEL);
}

#[tokio::test]
async fn test_pokemon_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v2/pokemon/nonexistentpokemon")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let pokemon = PokemonCommand::new(PokeApiClient::new(format!("{}/api/v2/pokemon", server.url()), None));
    let out = pokemon.execute(&args(&["nonexistentPokemon"])).await;
    assert_eq!(out, CommandOutput::failure(NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn test_pokemon_server_down() {
    let pokemon = PokemonCommand::new(PokeApiClient::new(DEAD_URL, None));
    let out = pokemon.execute(&args(&["pikachu"])).await;
    assert_eq!(out, CommandOutput::failure(POKEAPI_DOWN_MESSAGE));
}

#[tokio::test]
async fn test_pokemon_name_is_one_path_segment() {
    let mut server = Server::new_async().await;
    let encoded = server
        .mock("GET", "/api/v2/pokemon/a%3Fb")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let pokemon = PokemonCommand::new(PokeApiClient::new(format!("{}/api/v2/pokemon/", server.url()), None));
    let out = pokemon.execute(&args(&["a?b"])).await;

    encoded.assert_async().await;
    assert_eq!(out, CommandOutput::failure(NOT_FOUND_MESSAGE));

    // A dot segment never leaves the client.
    let offline = PokemonCommand::new(PokeApiClient::new(DEAD_URL, None));
    assert_eq!(offline.execute(&args(&[".."])).await, CommandOutput::failure(NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn test_pokemon_arity() {
    let pokemon = PokemonCommand::new(PokeApiClient::new(DEAD_URL, None));
    let out = pokemon.execute(&args(&["mr", "mime"])).await;
    assert_eq!(out.label, "'pokemon' should have 1 argument: the name of the pokemon");
}
