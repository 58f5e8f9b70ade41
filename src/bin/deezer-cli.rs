use clap::{Parser, Subcommand};
use deezer_sdk::{Config, Deezer, OAuthToken, Track, WidgetContent, WidgetSize};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deezer-cli")]
#[command(about = "CLI for the Deezer web API", long_about = None)]
struct Cli {
    /// Deezer application id (can also be set via DEEZER_APP_ID env var)
    #[arg(long, env = "DEEZER_APP_ID")]
    app_id: String,

    /// OAuth access token (can also be set via DEEZER_ACCESS_TOKEN env var)
    #[arg(long, env = "DEEZER_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL a user opens to authorize the application
    LoginUrl {
        /// Redirect URI registered for the application
        redirect_uri: String,
    },
    /// Exchange an authorization code for an access token
    Token {
        /// Code received on the redirect URI
        code: String,

        /// Application secret (can also be set via DEEZER_APP_SECRET env var)
        #[arg(long, env = "DEEZER_APP_SECRET", hide_env_values = true)]
        secret: String,
    },
    /// List the tracks of your flow
    Flow,
    /// List your playlists
    Playlists,
    /// List the artists you follow
    Artists,
    /// Show an artist and its top tracks
    Artist {
        /// Artist ID
        id: u64,
    },
    /// Show an album and its tracks
    Album {
        /// Album ID
        id: u64,
    },
    /// Build a player widget URL
    Widget {
        /// Track IDs to play
        #[arg(long, num_args = 1.., conflicts_with = "playlist", required_unless_present = "playlist")]
        tracks: Vec<u64>,

        /// Playlist ID to play (must be one of your playlists)
        #[arg(long)]
        playlist: Option<u64>,

        #[arg(long, default_value_t = deezer_sdk::widget::DEFAULT_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = deezer_sdk::widget::DEFAULT_HEIGHT)]
        height: u32,
    },
}

fn print_tracks(tracks: &[Track]) {
    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{}. {} [{}] (ID: {})",
            i + 1,
            track.title,
            track.duration_formatted(),
            track.id
        );
    }
}

fn client(cli: &Cli) -> Result<Deezer, Box<dyn std::error::Error>> {
    Ok(Deezer::with_config(&cli.app_id, &cli.token, Config::from_env()?)?)
}

fn open_session(cli: &Cli) -> Result<Deezer, Box<dyn std::error::Error>> {
    if cli.token.is_empty() {
        return Err("an access token is required (--token or DEEZER_ACCESS_TOKEN)".into());
    }
    client(cli)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::LoginUrl { redirect_uri } => {
            println!("{}", client(&cli)?.oauth_login_url(redirect_uri));
        }
        Commands::Token { code, secret } => {
            match client(&cli)?.exchange_oauth_code(secret, code).await? {
                OAuthToken::Granted {
                    access_token,
                    expires,
                } => {
                    println!("{}", access_token);
                    match expires {
                        Some(secs) if secs > 0 => eprintln!("Expires in {}s", secs),
                        _ => eprintln!("Token does not expire"),
                    }
                }
                OAuthToken::WrongCode => return Err("Deezer rejected the code".into()),
            }
        }
        Commands::Flow => print_tracks(&open_session(&cli)?.get_flow().await?),
        Commands::Playlists => {
            for playlist in open_session(&cli)?.get_my_playlists().await? {
                let marker = if playlist.is_loved_track { " ♥" } else { "" };
                println!("{} - {}{}", playlist.id, playlist.title, marker);
            }
        }
        Commands::Artists => {
            let artists = open_session(&cli)?.get_my_favorite_artists().await?;
            for artist in &artists {
                println!("{} - {}", artist.id, artist.name);
            }
            println!("{} artists", artists.len());
        }
        Commands::Artist { id } => {
            let artist = open_session(&cli)?.get_artist(*id).await?;
            println!("{} ({})", artist.name, artist.picture);
            print_tracks(&artist.get_tracks().await?);
        }
        Commands::Album { id } => {
            let album = open_session(&cli)?.get_album(*id).await?;
            println!("{} - {} tracks", album.title, album.nb_tracks);
            println!("Cover: {}", album.cover);
            print_tracks(&album.get_tracks().await?);
        }
        Commands::Widget {
            tracks,
            playlist,
            width,
            height,
        } => {
            let dz = open_session(&cli)?;
            let size = WidgetSize {
                width: *width,
                height: *height,
            };
            let url = match playlist {
                Some(id) => {
                    let found = dz
                        .get_my_playlists()
                        .await?
                        .into_iter()
                        .find(|p| p.id == *id)
                        .ok_or_else(|| format!("playlist {} not found in your playlists", id))?;
                    dz.get_widget(WidgetContent::Playlist(&found), size)
                }
                None => {
                    let mut resolved = Vec::with_capacity(tracks.len());
                    for id in tracks {
                        resolved.push(dz.get_track(*id).await?);
                    }
                    dz.get_widget(WidgetContent::Tracks(&resolved), size)
                }
            };
            println!("{}", url);
        }
    }

    Ok(())
}
