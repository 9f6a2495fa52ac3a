//! Static assets for the browser view.
//!
//! The page holds a single `<ul id="usages">`. `index.js` polls `/stats`
//! every 50ms and rebuilds the list from each successful response, the
//! same way the terminal monitor does.

/// The page served at `/`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CPU Usage</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    <h1>CPU Usage</h1>
    <ul id="usages"></ul>
    <script src="/index.js"></script>
</body>
</html>
"#;

/// Browser poller served at `/index.js`.
pub const INDEX_JS: &str = r#"const STATS_URL = '/stats';
const INTERVAL = 50;

async function fetchAndRender() {
  let response;
  try {
    response = await fetch(STATS_URL);
  } catch (_) {
    return;
  }
  if (response.status !== 200) {
    return;
  }

  let stats;
  try {
    stats = await response.json();
  } catch (_) {
    return;
  }

  const usages = stats['usages'];
  const list = document.getElementById('usages');
  list.innerHTML = '';
  for (const key in usages) {
    const item = document.createElement('li');
    item.innerText = key + ': ' + usages[key].toFixed(2);
    list.appendChild(item);
  }
}

const poller = {
  timer: null,
  start() {
    fetchAndRender();
    this.timer = setInterval(fetchAndRender, INTERVAL);
  },
  stop() {
    clearInterval(this.timer);
    this.timer = null;
  },
};

poller.start();
"#;

/// Stylesheet served at `/styles.css`.
pub const STYLES_CSS: &str = r#"body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: #1a1a2e;
    color: #eee;
    margin: 2rem;
}

h1 {
    font-size: 1.4rem;
    font-weight: 600;
}

#usages {
    list-style: none;
    padding: 0;
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
}

#usages li {
    padding: 0.2rem 0;
    border-bottom: 1px solid #2a2a4e;
}
"#;
