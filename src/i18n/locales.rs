/// Strings shown by the UI and the error states
#[derive(Debug)]
pub struct Messages {
  pub title: &'static str,
  pub loading: &'static str,
  pub no_characters_found: &'static str,
  pub error_loading: &'static str,
  error_searching: &'static str, // Contains a {name} placeholder
  pub page: &'static str,
  pub of: &'static str,

  pub search_placeholder: &'static str,
  pub search: &'static str,
  pub enter_search_term: &'static str,

  pub status: &'static str,
  pub species: &'static str,
  pub last_known_location: &'static str,
  pub first_seen_in: &'static str,
  pub alive: &'static str,
  pub dead: &'static str,
  pub unknown: &'static str,
  pub kind: &'static str,
  pub gender: &'static str,
  pub origin: &'static str,
  pub created: &'static str,
  pub episodes: &'static str,
  pub episode: &'static str,
  pub name: &'static str,
  pub air_date: &'static str,
  pub close: &'static str,
  pub error_loading_episodes: &'static str,

  pub change_language: &'static str,
  pub theme: &'static str,
  pub light: &'static str,
  pub dark: &'static str,
  pub font: &'static str,
  pub hide_portal: &'static str,
  pub show_portal: &'static str,
  pub refresh: &'static str,
  pub quit: &'static str,
}

impl Messages {
  /// "No characters found" phrased for an active name filter.
  pub fn error_searching(&self, name: &str) -> String {
    self.error_searching.replace("{name}", name)
  }
}

pub static EN_US: Messages = Messages {
  title: "Rick and Morty Tracker",
  loading: "Loading...",
  no_characters_found: "No characters found",
  error_loading: "Failed to load characters. Please try again.",
  error_searching: "No characters found with name \"{name}\". Try a different search.",
  page: "Page",
  of: "of",

  search_placeholder: "Search characters...",
  search: "Search",
  enter_search_term: "Please enter a search term",

  status: "Status",
  species: "Species",
  last_known_location: "Last known location",
  first_seen_in: "First seen in",
  alive: "Alive",
  dead: "Dead",
  unknown: "Unknown",
  kind: "Type",
  gender: "Gender",
  origin: "Origin",
  created: "Created",
  episodes: "Episodes",
  episode: "Episode",
  name: "Name",
  air_date: "Air Date",
  close: "Close",
  error_loading_episodes: "Failed to load episodes",

  change_language: "Change language",
  theme: "Theme",
  light: "Light",
  dark: "Dark",
  font: "Font",
  hide_portal: "Hide Portal",
  show_portal: "Show Portal",
  refresh: "Refresh",
  quit: "Quit",
};

pub static PT_BR: Messages = Messages {
  title: "Rick and Morty",
  loading: "Carregando...",
  no_characters_found: "Nenhum personagem encontrado",
  error_loading: "Falha ao carregar personagens. Por favor, tente novamente.",
  error_searching:
    "Nenhum personagem encontrado com o nome \"{name}\". Tente uma busca diferente.",
  page: "Página",
  of: "de",

  search_placeholder: "Pesquisar personagens...",
  search: "Pesquisar",
  enter_search_term: "Por favor, digite um termo para pesquisa",

  status: "Status",
  species: "Espécie",
  last_known_location: "Última localização conhecida",
  first_seen_in: "Primeira aparição em",
  alive: "Vivo",
  dead: "Morto",
  unknown: "Desconhecido",
  kind: "Tipo",
  gender: "Gênero",
  origin: "Origem",
  created: "Criado",
  episodes: "Episódios",
  episode: "Episódio",
  name: "Nome",
  air_date: "Data de Exibição",
  close: "Fechar",
  error_loading_episodes: "Falha ao carregar episódios",

  change_language: "Mudar idioma",
  theme: "Tema",
  light: "Claro",
  dark: "Escuro",
  font: "Fonte",
  hide_portal: "Esconder Portal",
  show_portal: "Mostrar Portal",
  refresh: "Atualizar",
  quit: "Sair",
};
