/// Embedded single-file dashboard (HTML + CSS + JS)
pub const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>WinMix Match Dashboard</title>
<style>
  :root {
    --bg: #0a0a12;
    --card: #141622;
    --border: #262a3a;
    --accent: #8b5cf6;
    --green: #10b981;
    --amber: #f59e0b;
    --sky: #0ea5e9;
    --red: #ef4444;
    --text: #e4e4e7;
    --muted: #8b8ba7;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  header nav { margin-left: auto; display: flex; gap: .5rem; }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; display: flex; justify-content: space-between; align-items: center; gap: .5rem; }
  .panel-body { padding: 1rem 1.2rem; }
  .filters { display: flex; flex-wrap: wrap; gap: .8rem; align-items: end; }
  .filters label { display: grid; gap: .3rem; font-size: .75rem; color: var(--muted); text-transform: uppercase; }
  select, input { background: #0f111a; color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .45rem .6rem; font-size: .88rem; }
  button { background: none; border: 1px solid var(--border); color: var(--text); padding: .45rem .9rem; border-radius: 6px; cursor: pointer; font-size: .85rem; }
  button:hover { border-color: var(--accent); color: var(--accent); }
  button.primary { background: var(--accent); border-color: var(--accent); color: #fff; }
  .stats-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 1rem; }
  .stat-card { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.1rem; }
  .stat-card .label { color: var(--muted); font-size: .75rem; text-transform: uppercase; letter-spacing: .06em; margin-bottom: .4rem; }
  .stat-card .value { font-size: 1.6rem; font-weight: 700; }
  .bar { display: flex; height: 14px; border-radius: 7px; overflow: hidden; background: #1e2130; margin: .5rem 0; }
  .bar span { display: block; height: 100%; }
  .legend { display: flex; gap: 1rem; font-size: .8rem; color: var(--muted); }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); cursor: pointer; user-select: none; }
  td { padding: .6rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr.row:hover td { background: #1a1d2b; cursor: pointer; }
  a.team { color: var(--text); text-decoration: none; }
  a.team:hover { color: var(--accent); }
  .pill { padding: .15rem .5rem; border-radius: 999px; font-size: .72rem; font-weight: 600; }
  .pill.yes { background: rgba(16,185,129,.15); color: var(--green); }
  .pill.no { background: rgba(100,116,139,.15); color: var(--muted); }
  .pager { display: flex; gap: .6rem; align-items: center; padding: .8rem 1.2rem; font-size: .85rem; color: var(--muted); }
  .empty { color: var(--muted); text-align: center; padding: 2rem; font-size: .9rem; }
  .two-col { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 900px) { .two-col { grid-template-columns: 1fr; } }
  .form { display: flex; gap: .3rem; }
  .form span { width: 26px; height: 26px; border-radius: 6px; display: inline-flex; align-items: center; justify-content: center; font-weight: 700; font-size: .8rem; }
  .form .W { background: var(--green); color: #000; }
  .form .D { background: var(--amber); color: #000; }
  .form .L { background: var(--red); color: #000; }
  #toast { position: fixed; right: 1.5rem; bottom: 1.5rem; display: grid; gap: .5rem; }
  #toast div { padding: .7rem 1rem; border-radius: 8px; background: var(--card); border: 1px solid var(--border); font-size: .85rem; }
  #toast div.error { border-color: var(--red); color: var(--red); }
  #toast div.success { border-color: var(--green); color: var(--green); }
  .hidden { display: none; }
</style>
</head>
<body>
<header>
  <h1>⚽ WinMix</h1>
  <span style="color:var(--muted);font-size:.85rem;">Match filter &amp; statistics</span>
  <nav>
    <button onclick="show('dashboard')">Dashboard</button>
    <button onclick="show('admin')">Admin</button>
  </nav>
</header>

<main id="dashboard">
  <div class="panel">
    <div class="panel-header">Filters
      <span>
        <select id="saved-filters" onchange="applySaved(this.value)"><option value="">Saved filters…</option></select>
        <button onclick="deleteSaved()">Delete</button>
      </span>
    </div>
    <div class="panel-body filters">
      <label>Home team<select id="f-home"><option value="">Any</option></select></label>
      <label>Away team<select id="f-away"><option value="">Any</option></select></label>
      <label>BTTS<select id="f-btts"><option value="">Any</option><option value="true">Yes</option><option value="false">No</option></select></label>
      <label>Comeback<select id="f-comeback"><option value="">Any</option><option value="true">Yes</option><option value="false">No</option></select></label>
      <button class="primary" onclick="applyFilters()">Apply</button>
      <button onclick="resetFilters()">Reset</button>
      <button onclick="exportCsv()">Export CSV</button>
      <input id="save-name" placeholder="Preset name">
      <button onclick="saveFilter()">Save</button>
    </div>
  </div>

  <div class="stats-grid">
    <div class="stat-card"><div class="label">Matches</div><div class="value" id="s-total">–</div></div>
    <div class="stat-card"><div class="label">Home wins</div><div class="value" id="s-home">–</div></div>
    <div class="stat-card"><div class="label">Draws</div><div class="value" id="s-draws">–</div></div>
    <div class="stat-card"><div class="label">Away wins</div><div class="value" id="s-away">–</div></div>
    <div class="stat-card"><div class="label">BTTS</div><div class="value" id="s-btts">–</div></div>
    <div class="stat-card"><div class="label">Comebacks</div><div class="value" id="s-comebacks">–</div></div>
  </div>

  <div class="two-col">
    <div class="panel">
      <div class="panel-header">Results <button onclick="openExtended()">Extended stats</button></div>
      <div class="panel-body">
        <div class="bar" id="results-bar"></div>
        <div class="legend"><span style="color:var(--green)">■ Home</span><span style="color:var(--amber)">■ Draw</span><span style="color:var(--sky)">■ Away</span></div>
        <div class="bar" id="btts-bar"></div>
        <div class="legend"><span style="color:var(--accent)">■ BTTS yes</span><span>■ BTTS no</span></div>
      </div>
    </div>
    <div class="panel" id="extended">
      <div class="panel-header">Extended statistics <span id="ext-teams" style="color:var(--muted);font-weight:400"></span></div>
      <div class="panel-body" id="ext-body"><div class="empty">Open “Extended stats” to load</div></div>
    </div>
  </div>

  <div class="panel">
    <div class="panel-header">Matches
      <label style="font-size:.8rem;color:var(--muted);">Per page
        <select id="page-size" onchange="loadTable({ resize: this.value })">
          <option>25</option><option selected>50</option><option>100</option><option>200</option>
        </select>
      </label>
    </div>
    <table>
      <thead><tr>
        <th onclick="loadTable({ toggle: 'home' })">Home</th>
        <th onclick="loadTable({ toggle: 'away' })">Away</th>
        <th onclick="loadTable({ toggle: 'ht' })">Half time</th>
        <th onclick="loadTable({ toggle: 'ft' })">Full time</th>
        <th onclick="loadTable({ toggle: 'btts' })">BTTS</th>
        <th onclick="loadTable({ toggle: 'comeback' })">Comeback</th>
      </tr></thead>
      <tbody id="matches-tbody"><tr><td colspan="6" class="empty">Loading…</td></tr></tbody>
    </table>
    <div class="pager">
      <button onclick="loadTable({ nav: 'prev' })">‹ Prev</button>
      <span id="page-info">–</span>
      <button onclick="loadTable({ nav: 'next' })">Next ›</button>
    </div>
  </div>

  <div class="panel hidden" id="detail">
    <div class="panel-header"><span id="detail-title"></span><button onclick="hide('detail')">Close</button></div>
    <div class="panel-body" id="detail-body"></div>
  </div>
</main>

<main id="admin" class="hidden">
  <div class="panel">
    <div class="panel-header">Database connection <span id="admin-status" style="font-weight:400"></span></div>
    <div class="panel-body filters">
      <label>URL<input id="a-url" size="40" placeholder="https://your-project.example.com"></label>
      <label>API key<input id="a-key" type="password" size="30"></label>
      <button onclick="toggleKey()">Show</button>
      <button onclick="testConnection()">Test</button>
      <button class="primary" onclick="saveConnection()">Save</button>
      <button onclick="resetConnection()">Reset</button>
    </div>
  </div>
</main>

<div id="toast"></div>

<script>
const $ = id => document.getElementById(id);
const esc = s => String(s).replace(/[&<>"']/g, c => ({ '&':'&amp;', '<':'&lt;', '>':'&gt;', '"':'&quot;', "'":'&#39;' }[c]));
const yesNo = b => `<span class="pill ${b ? 'yes' : 'no'}">${b ? 'Yes' : 'No'}</span>`;
const teamLink = name => `<a class="team" href="#" data-team="${esc(name)}">${esc(name)}</a>`;

let filters = {};
let view = { sort: { key: null, direction: 'asc' }, page: 1, pageSize: 50 };
let savedFilters = [];
// Only the newest dashboard request may update the page
let seq = 0;

function toast(message, type) {
  const el = document.createElement('div');
  el.className = type;
  el.textContent = message;
  $('toast').appendChild(el);
  setTimeout(() => el.remove(), 3500);
}

function show(id) {
  ['dashboard', 'admin'].forEach(s => $(s).classList.toggle('hidden', s !== id));
  if (id === 'admin') loadAdmin();
}
function hide(id) { $(id).classList.add('hidden'); }

function filterParams(extra) {
  const p = new URLSearchParams();
  for (const [k, v] of Object.entries(filters)) if (v !== null && v !== '') p.set(k, v);
  for (const [k, v] of Object.entries(extra || {})) if (v !== null && v !== undefined) p.set(k, v);
  return p;
}

async function getJson(url) {
  const r = await fetch(url);
  if (!r.ok) throw new Error(await r.text() || r.statusText);
  return r.json();
}

function readFilters() {
  const b = v => v === '' ? null : v === 'true';
  return {
    home: $('f-home').value || null,
    away: $('f-away').value || null,
    btts: b($('f-btts').value),
    comeback: b($('f-comeback').value),
  };
}

function writeFilters(f) {
  $('f-home').value = f.home || '';
  $('f-away').value = f.away || '';
  $('f-btts').value = f.btts === null || f.btts === undefined ? '' : String(f.btts);
  $('f-comeback').value = f.comeback === null || f.comeback === undefined ? '' : String(f.comeback);
}

async function loadTeams() {
  const teams = await getJson('/api/teams');
  for (const sel of ['f-home', 'f-away']) {
    $(sel).innerHTML = '<option value="">Any</option>' +
      teams.map(t => `<option value="${esc(t.name)}">${esc(t.name)}</option>`).join('');
  }
}

async function refresh(message) {
  const mine = ++seq;
  try {
    const [summary, page] = await Promise.all([
      getJson('/api/summary?' + filterParams()),
      getJson('/api/matches?' + tableParams()),
    ]);
    if (mine !== seq) return;
    renderSummary(summary);
    renderTable(page);
    if (message) toast(message, 'success');
  } catch (e) {
    // Keep whatever is already on screen
    if (mine === seq) toast('Failed to load matches: ' + e.message, 'error');
  }
}

function tableParams(action) {
  return filterParams(Object.assign({
    sort: view.sort.key, dir: view.sort.direction, page: view.page, pageSize: view.pageSize,
  }, action || {}));
}

async function loadTable(action) {
  const mine = ++seq;
  try {
    const page = await getJson('/api/matches?' + tableParams(action));
    if (mine === seq) renderTable(page);
  } catch (e) {
    if (mine === seq) toast('Failed to load matches: ' + e.message, 'error');
  }
}

function renderSummary(s) {
  $('s-total').textContent = s.total;
  $('s-home').textContent = s.homeWins;
  $('s-draws').textContent = s.draws;
  $('s-away').textContent = s.awayWins;
  $('s-btts').textContent = s.bttsPercentage + '%';
  $('s-comebacks').textContent = s.comebackCount;
  const w = n => s.total ? (n / s.total * 100) + '%' : '0';
  $('results-bar').innerHTML =
    `<span style="width:${w(s.homeWins)};background:var(--green)"></span>` +
    `<span style="width:${w(s.draws)};background:var(--amber)"></span>` +
    `<span style="width:${w(s.awayWins)};background:var(--sky)"></span>`;
  $('btts-bar').innerHTML =
    `<span style="width:${w(s.bttsCount)};background:var(--accent)"></span>`;
}

function renderTable(page) {
  view = page.view;
  $('page-size').value = String(page.pageSize);
  $('page-info').textContent = `Page ${page.page} of ${page.totalPages} · ${page.totalRows} matches`;
  const tbody = $('matches-tbody');
  if (!page.rows.length) { tbody.innerHTML = '<tr><td colspan="6" class="empty">No matches found</td></tr>'; return; }
  tbody.innerHTML = page.rows.map(m => `<tr class="row" data-id="${m.id}">
    <td>${teamLink(m.home)}</td>
    <td>${teamLink(m.away)}</td>
    <td>${esc(m.ht)}</td>
    <td><strong>${esc(m.ft)}</strong></td>
    <td>${yesNo(m.btts)}</td>
    <td>${yesNo(m.comeback)}</td>
  </tr>`).join('');
}

async function openExtended() {
  try {
    const p = new URLSearchParams();
    if (filters.home) p.set('home', filters.home);
    if (filters.away) p.set('away', filters.away);
    const ext = await getJson('/api/extended-stats?' + p);
    const s = ext.summary;
    $('ext-teams').textContent = [ext.homeTeam && ext.homeTeam.name, ext.awayTeam && ext.awayTeam.name].filter(Boolean).join(' vs ');
    const freq = s.frequentResults.map(r => `<tr><td>${esc(r.score)}</td><td>${r.count}</td></tr>`).join('')
      || '<tr><td colspan="2" class="empty">No matches</td></tr>';
    $('ext-body').innerHTML = `
      <div class="stats-grid">
        <div class="stat-card"><div class="label">Avg home goals</div><div class="value">${s.homeGoalAvg.toFixed(1)}</div></div>
        <div class="stat-card"><div class="label">Avg away goals</div><div class="value">${s.awayGoalAvg.toFixed(1)}</div></div>
        <div class="stat-card"><div class="label">BTTS</div><div class="value">${s.bttsPercentage}%</div></div>
      </div>
      <table><thead><tr><th>Most frequent results</th><th>Count</th></tr></thead><tbody>${freq}</tbody></table>`;
  } catch (e) {
    toast('Failed to load extended stats: ' + e.message, 'error');
  }
}

async function showMatch(id) {
  try {
    const d = await getJson('/api/matches/' + id);
    const m = d.match, b = d.breakdown;
    $('detail-title').textContent = `Match #${m.id}: ${m.home} – ${m.away}`;
    $('detail-body').innerHTML = `
      <div class="stats-grid">
        <div class="stat-card"><div class="label">Full time</div><div class="value">${esc(m.ft)}</div></div>
        <div class="stat-card"><div class="label">Half time</div><div class="value">${esc(m.ht)}</div></div>
        <div class="stat-card"><div class="label">Total goals</div><div class="value">${b.totalGoals}</div></div>
        <div class="stat-card"><div class="label">2nd half goals</div><div class="value">${b.secondHalfGoals}</div></div>
        <div class="stat-card"><div class="label">Home share</div><div class="value">${b.homeScorePercentage}%</div></div>
        <div class="stat-card"><div class="label">BTTS / Comeback</div><div class="value">${yesNo(m.btts)} ${yesNo(m.comeback)}</div></div>
      </div>`;
    $('detail').classList.remove('hidden');
  } catch (e) {
    toast('Match not available: ' + e.message, 'error');
  }
}

async function showTeam(name) {
  try {
    const t = await getJson('/api/teams/' + encodeURIComponent(name));
    $('detail-title').innerHTML = `<img src="${esc(t.team.logoUrl)}" width="24" height="24" style="vertical-align:middle"> ${esc(t.team.name)}`;
    const form = t.form.map(f => `<span class="${f.result}" title="${esc(f.opponent)} ${esc(f.score)}">${f.result}</span>`).join('');
    $('detail-body').innerHTML = `
      <div class="stats-grid">
        <div class="stat-card"><div class="label">Matches</div><div class="value">${t.totalMatches}</div></div>
        <div class="stat-card"><div class="label">W / D / L</div><div class="value">${t.wins} / ${t.draws} / ${t.losses}</div></div>
        <div class="stat-card"><div class="label">Win %</div><div class="value">${t.winPercentage}%</div></div>
        <div class="stat-card"><div class="label">Goals</div><div class="value">${t.goalsScored}:${t.goalsConceded}</div></div>
        <div class="stat-card"><div class="label">Avg scored</div><div class="value">${t.averageGoalsScored.toFixed(2)}</div></div>
        <div class="stat-card"><div class="label">BTTS %</div><div class="value">${t.bttsPercentage}%</div></div>
      </div>
      <p style="margin-top:1rem;color:var(--muted)">Form</p><div class="form">${form}</div>`;
    $('detail').classList.remove('hidden');
  } catch (e) {
    toast('Team not available: ' + e.message, 'error');
  }
}

function applyFilters() {
  filters = readFilters();
  view.page = 1;
  refresh('Filters applied');
}

function resetFilters() {
  filters = {};
  writeFilters({});
  view.page = 1;
  refresh('Filters reset');
}

function exportCsv() {
  window.location = '/api/export.csv?' + filterParams();
}

async function loadSaved() {
  try {
    savedFilters = await getJson('/api/saved-filters');
  } catch (e) {
    savedFilters = [];
  }
  $('saved-filters').innerHTML = '<option value="">Saved filters…</option>' +
    savedFilters.map(f => `<option value="${esc(f.id)}">${esc(f.name)}</option>`).join('');
}

function applySaved(id) {
  const f = savedFilters.find(s => s.id === id);
  if (!f) return;
  writeFilters(f.filters);
  applyFilters();
}

async function saveFilter() {
  const name = $('save-name').value.trim();
  if (!name) return;
  const r = await fetch('/api/saved-filters', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ name, filters: readFilters() }),
  });
  if (r.ok) { $('save-name').value = ''; toast('Filter saved', 'success'); loadSaved(); }
  else toast('Could not save filter: ' + await r.text(), 'error');
}

async function deleteSaved() {
  const id = $('saved-filters').value;
  if (!id) return;
  await fetch('/api/saved-filters/' + encodeURIComponent(id), { method: 'DELETE' });
  loadSaved();
}

function connectionBody() {
  return JSON.stringify({ url: $('a-url').value, key: $('a-key').value });
}

function renderAdminStatus(connected) {
  $('admin-status').textContent = connected ? '● connected' : '○ not connected';
  $('admin-status').style.color = connected ? 'var(--green)' : 'var(--muted)';
}

async function loadAdmin() {
  try {
    const c = await getJson('/api/admin/config');
    $('a-url').value = c.url;
    $('a-key').value = c.key;
    renderAdminStatus(c.isConnected);
  } catch (e) {
    toast('Could not load admin config: ' + e.message, 'error');
  }
}

function toggleKey() {
  $('a-key').type = $('a-key').type === 'password' ? 'text' : 'password';
}

async function testConnection() {
  const r = await fetch('/api/admin/test', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: connectionBody() });
  if (!r.ok) { toast(await r.text(), 'error'); return; }
  const t = await r.json();
  toast(t.message, t.success ? 'success' : 'error');
}

async function saveConnection() {
  const r = await fetch('/api/admin/config', { method: 'PUT', headers: { 'Content-Type': 'application/json' }, body: connectionBody() });
  if (!r.ok) { toast(await r.text(), 'error'); return; }
  const res = await r.json();
  toast(res.test.message, res.saved ? 'success' : 'error');
  renderAdminStatus(res.config.isConnected);
}

async function resetConnection() {
  await fetch('/api/admin/config', { method: 'DELETE' });
  loadAdmin();
}

// Row and team-link clicks; names stay in data attributes
$('matches-tbody').addEventListener('click', e => {
  const link = e.target.closest('a.team');
  if (link) {
    e.preventDefault();
    showTeam(link.dataset.team);
    return;
  }
  const row = e.target.closest('tr.row');
  if (row) showMatch(Number(row.dataset.id));
});

loadTeams().catch(e => toast('Failed to load teams: ' + e.message, 'error'));
loadSaved();
refresh();
</script>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_complete() {
        assert!(DASHBOARD_HTML.starts_with("<!DOCTYPE html>"));
        assert!(DASHBOARD_HTML.trim_end().ends_with("</html>"));
        assert!(DASHBOARD_HTML.contains("</script>"));
    }

    #[test]
    fn test_team_names_not_inlined_into_handlers() {
        assert!(!DASHBOARD_HTML.contains("showTeam('"));
        assert!(DASHBOARD_HTML.contains("data-team="));
    }
}
