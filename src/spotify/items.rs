use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::RoastError,
    types::{
        CollectMode, Image, NamedItem, PlaylistTracksResponse, TopArtistsResponse,
        TopTracksResponse, TrackAlbum,
    },
    utils,
};

/// Items per top-artists and top-tracks request.
pub const TOP_ITEMS_LIMIT: u32 = 5;

/// Playlist entries fetched for a playlist roast.
pub const PLAYLIST_PAGE_SIZE: u32 = 8;

const TIME_RANGE: &str = "medium_term";

/// Read-only client for the Spotify Web API endpoints the roast needs.
pub struct SpotifyClient {
    client: Client,
    api_url: String,
}

impl SpotifyClient {
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client, already bounded by the configured timeout
    /// * `api_url` - Web API base, e.g. `https://api.spotify.com/v1`
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Collects the named items to roast.
    ///
    /// In [`CollectMode::UserTaste`] the top artists and top tracks
    /// (`medium_term`, [`TOP_ITEMS_LIMIT`] each) are requested concurrently and
    /// returned artists first. In [`CollectMode::Playlist`] the first
    /// [`PLAYLIST_PAGE_SIZE`] entries are returned as `"<track> by <artist>"`,
    /// skipping entries whose track is unavailable.
    ///
    /// # Arguments
    ///
    /// * `mode` - Whether to roast the user's taste or a playlist
    /// * `access_token` - Fresh access token of the signed-in user
    ///
    /// # Errors
    ///
    /// - [`RoastError::AuthExpired`] when a top-items request answers 401
    /// - [`RoastError::InvalidInput`] when the playlist URL has no playlist id
    /// - [`RoastError::DataFetch`] for any other failed or malformed response
    ///
    /// An empty collection is not an error.
    ///
    /// # Example
    ///
    /// ```
    /// let spotify = SpotifyClient::new(client, settings.api_url.clone());
    /// let mode = CollectMode::Playlist {
    ///     url: "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M".to_string(),
    /// };
    /// let items = spotify.collect_items(&mode, &record.access_token).await?;
    /// ```
    pub async fn collect_items(
        &self,
        mode: &CollectMode,
        access_token: &str,
    ) -> Result<Vec<NamedItem>, RoastError> {
        match mode {
            CollectMode::UserTaste => self.user_taste(access_token).await,
            CollectMode::Playlist { url } => self.playlist(url, access_token).await,
        }
    }

    async fn user_taste(&self, access_token: &str) -> Result<Vec<NamedItem>, RoastError> {
        let artists_url = format!(
            "{uri}/me/top/artists?time_range={range}&limit={limit}",
            uri = self.api_url,
            range = TIME_RANGE,
            limit = TOP_ITEMS_LIMIT
        );
        let tracks_url = format!(
            "{uri}/me/top/tracks?time_range={range}&limit={limit}",
            uri = self.api_url,
            range = TIME_RANGE,
            limit = TOP_ITEMS_LIMIT
        );

        // both requests are in flight before either is awaited
        let (artists_res, tracks_res) = tokio::join!(
            self.client.get(&artists_url).bearer_auth(access_token).send(),
            self.client.get(&tracks_url).bearer_auth(access_token).send(),
        );
        let artists_res = artists_res.map_err(fetch_error)?;
        let tracks_res = tracks_res.map_err(fetch_error)?;

        if artists_res.status() == StatusCode::UNAUTHORIZED
            || tracks_res.status() == StatusCode::UNAUTHORIZED
        {
            return Err(RoastError::AuthExpired);
        }
        if !artists_res.status().is_success() || !tracks_res.status().is_success() {
            return Err(RoastError::DataFetch(format!(
                "Failed to fetch top artists/tracks (artists: {}, tracks: {})",
                artists_res.status(),
                tracks_res.status()
            )));
        }

        let artists: TopArtistsResponse = parse(artists_res).await?;
        let tracks: TopTracksResponse = parse(tracks_res).await?;

        let artist_items = artists.items.into_iter().map(|artist| NamedItem {
            name: artist.name,
            image_url: first_image(artist.images),
        });
        let track_items = tracks.items.into_iter().map(|track| NamedItem {
            name: track.name,
            image_url: album_image(track.album),
        });

        Ok(artist_items.chain(track_items).collect())
    }

    async fn playlist(&self, url: &str, access_token: &str) -> Result<Vec<NamedItem>, RoastError> {
        let playlist_id = utils::extract_playlist_id(url).ok_or_else(|| {
            RoastError::InvalidInput(format!(
                "{} (expected something like open.spotify.com/playlist/...)",
                url
            ))
        })?;

        let api_url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            limit = PLAYLIST_PAGE_SIZE
        );
        let res = self
            .client
            .get(&api_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(fetch_error)?;

        if !res.status().is_success() {
            return Err(RoastError::DataFetch(format!(
                "Failed to fetch playlist {}: {}",
                playlist_id,
                res.status()
            )));
        }

        let page: PlaylistTracksResponse = parse(res).await?;
        Ok(page
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .map(|track| {
                let name = match track.artists.first() {
                    Some(artist) => format!("{} by {}", track.name, artist.name),
                    None => track.name,
                };
                NamedItem {
                    name,
                    image_url: album_image(track.album),
                }
            })
            .collect())
    }
}

async fn parse<T: DeserializeOwned>(res: Response) -> Result<T, RoastError> {
    res.json::<T>()
        .await
        .map_err(|e| RoastError::DataFetch(format!("unexpected payload: {}", e)))
}

fn fetch_error(err: reqwest::Error) -> RoastError {
    RoastError::DataFetch(err.to_string())
}

fn first_image(images: Vec<Image>) -> Option<String> {
    images.into_iter().next().map(|image| image.url)
}

fn album_image(album: Option<TrackAlbum>) -> Option<String> {
    album.and_then(|album| first_image(album.images))
}
