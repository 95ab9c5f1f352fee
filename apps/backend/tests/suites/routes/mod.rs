mod api_sports;
mod api_teams;
mod match_pages;
mod player_pages;
mod team_pages;
