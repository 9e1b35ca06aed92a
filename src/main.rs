use std::process::ExitCode;
use std::sync::Arc;

use skyguess_core::{AppError, Config};
use skyguess_game::{GameService, PredictionGuess, SystemClock};
use skyguess_weather::{CurrentWeather, WeatherCondition, WeatherObservation};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("SkyGuess failed: {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = Config::load()?;
    skyguess_core::init(&config.logging.level)?;
    config.check()?;

    // One engine for the whole process, handed to whoever needs it
    let service = GameService::open(&config, Arc::new(SystemClock))?;

    tracing::info!("SkyGuess started");

    let prediction =
        service.create_prediction("Home", PredictionGuess::new(18.0, "Clear", false))?;

    // Stand-in for the weather fetch layer
    let current = CurrentWeather {
        temperature: 19.5,
        feels_like: 19.0,
        humidity: 55,
        wind_speed: 8.0,
        condition: WeatherCondition::from_wmo_code(0),
        updated_at: chrono::Utc::now(),
    };
    let resolved =
        service.resolve_prediction(&prediction.id, &WeatherObservation::from(&current))?;

    let quiz = service.generate_quiz();
    let answer = service.submit_quiz_answer(&quiz.id, quiz.correct_index)?;

    let stats = service.get_user_stats();

    println!("SkyGuess - Weather Prediction Game");
    println!(
        "\nLast prediction: {:.0}% accurate, {} points",
        resolved.accuracy, resolved.points
    );
    println!("Quiz: {}", quiz.question);
    println!("  {}", answer.explanation);
    println!(
        "\nLevel {} ({} XP, {} to next level)",
        stats.level, stats.experience, stats.experience_to_next_level
    );
    println!("Total points: {}", stats.total_points);
    println!(
        "Achievements: {}/{}",
        stats.achievements_unlocked, stats.total_achievements
    );
    println!("State file: {}", config.state_path().display());

    Ok(())
}
